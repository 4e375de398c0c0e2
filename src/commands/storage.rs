//! Session Persistence
//!
//! Keeps the session in `localStorage` so a reload does not sign the user out.

use todo_core::session::{decode_session, encode_session, SESSION_STORAGE_KEY};
use todo_core::Session;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    decode_session(&raw)
}

pub fn save_session(session: &Session) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, session will not survive a reload");
        return;
    };
    match encode_session(session) {
        Ok(raw) => {
            if storage.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                log::warn!("could not persist session");
            }
        }
        Err(e) => log::error!("could not encode session: {}", e),
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
    }
}
