use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Claims;

/// Screen the front end should show for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Misconfigured,
    Login,
    Admin,
    Legal,
    Offline,
    Main,
}

pub fn resolve_screen(configured: bool, session: Option<&Claims>, is_working_time: bool) -> Screen {
    if !configured {
        return Screen::Misconfigured;
    }

    let Some(claims) = session else {
        return Screen::Login;
    };

    if claims.is_admin() {
        Screen::Admin
    } else if !claims.legal_accepted {
        Screen::Legal
    } else if !is_working_time {
        Screen::Offline
    } else {
        Screen::Main
    }
}
