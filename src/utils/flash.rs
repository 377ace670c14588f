use axum_extra::extract::cookie::{Cookie, CookieJar};
use mongodb::bson::oid::ObjectId;

pub const FLASH_COOKIE: &str = "flash";

/// One-shot message carried across a redirect in a cookie, addressed to one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Voted,
    InvalidChoice,
}

impl Flash {
    fn as_str(self) -> &'static str {
        match self {
            Flash::Voted => "voted",
            Flash::InvalidChoice => "invalid_choice",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "voted" => Some(Flash::Voted),
            "invalid_choice" => Some(Flash::InvalidChoice),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::Voted => "Thank you for voting!",
            Flash::InvalidChoice => "Your vote was not recorded: select a valid choice.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Flash::InvalidChoice)
    }
}

pub fn set_flash(jar: CookieJar, flash: Flash, poll_id: ObjectId) -> CookieJar {
    let value = format!("{}.{}", flash.as_str(), poll_id.to_hex());
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true))
}

/// Reads the flash addressed to `poll_id` and clears the cookie. A flash left
/// for another poll stays in place until that poll's page is shown; a value
/// that does not parse is discarded.
pub fn take_flash(jar: CookieJar, poll_id: ObjectId) -> (CookieJar, Option<Flash>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let parsed = value.split_once('.').and_then(|(kind, target)| {
        Some((Flash::parse(kind)?, ObjectId::parse_str(target).ok()?))
    });

    match parsed {
        Some((_, target)) if target != poll_id => (jar, None),
        Some((flash, _)) => (clear(jar), Some(flash)),
        None => (clear(jar), None),
    }
}

fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
}
