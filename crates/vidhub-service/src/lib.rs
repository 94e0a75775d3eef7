//! # vidhub-service
//!
//! Business logic service layer for VidHub. Each service orchestrates the
//! stores, the media host, and the session token manager to implement an
//! application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod channel;
pub mod context;
pub mod user;
pub mod video;

pub use channel::ChannelService;
pub use context::RequestContext;
pub use user::{NewAccount, RegisterUser, UpdateAccount, UserService, check_new_account};
pub use video::{PublishVideo, VideoService};
