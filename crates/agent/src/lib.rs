//! Session manager: the edge contract over a per-session stream of client
//! events, fronting the turn orchestrator.

pub mod session_manager;

pub use session_manager::{
    decode_audio_payload, ClientEvent, ServerEvent, SessionDefaults, SessionManager,
    SessionManagerError,
};
