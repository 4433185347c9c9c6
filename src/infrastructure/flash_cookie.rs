// Signed one-shot flash cookie
use crate::domain::flash::{Flash, FlashLevel};
use axum::http::{header, HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const FLASH_COOKIE: &str = "flash";

/// Cookie value layout: `<level>.<urlencoded message>.<hex hmac-sha256 tag>`.
#[derive(Clone)]
pub struct FlashSigner {
    secret: String,
}

/// Result of reading the request's flash cookie. `present` is set whenever a
/// cookie was sent, valid or not, so the response can clear it.
#[derive(Debug, Default)]
pub struct TakenFlash {
    pub flash: Option<Flash>,
    pub present: bool,
}

impl FlashSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, level: &str, message: &str) -> Option<Hmac<Sha256>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).ok()?;
        let payload = format!("{level}\n{message}");
        mac.update(payload.as_bytes());
        Some(mac)
    }

    fn tag(&self, level: &str, message: &str) -> String {
        self.mac(level, message)
            .map(|mac| hex::encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    pub fn encode(&self, flash: &Flash) -> String {
        let level = flash.level.as_str();
        format!(
            "{}.{}.{}",
            level,
            urlencoding::encode(&flash.message),
            self.tag(level, &flash.message)
        )
    }

    pub fn decode(&self, value: &str) -> Option<Flash> {
        let (level, rest) = value.split_once('.')?;
        let (encoded, tag) = rest.rsplit_once('.')?;
        let message = urlencoding::decode(encoded).ok()?;

        let tag = hex::decode(tag).ok()?;
        if self.mac(level, &message)?.verify_slice(&tag).is_err() {
            tracing::warn!("Discarding flash cookie with bad signature");
            return None;
        }

        Some(Flash {
            level: FlashLevel::parse(level)?,
            message: message.into_owned(),
        })
    }

    pub fn set_cookie(&self, flash: &Flash) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode(flash)
        ))
        .ok()
    }

    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }

    /// Read the flash cookie from the request, if any.
    pub fn take(&self, headers: &HeaderMap) -> TakenFlash {
        let Some(raw) = find_cookie(headers, FLASH_COOKIE) else {
            return TakenFlash::default();
        };

        TakenFlash {
            flash: self.decode(raw),
            present: true,
        }
    }
}

fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}
