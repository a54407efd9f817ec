//! Tool calling pipeline pieces
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  tools/list   ┌─────────────────────┐
//! │  ToolSession │──────────────▶│  adapter::adapt     │──▶ ToolDeclaration[]
//! └──────────────┘               └─────────────────────┘        │
//!        ▲                                                      ▼
//!        │ tools/call            ┌─────────────────────┐   ModelBackend
//!        └───────────────────────│  dispatcher         │◀── interpret()
//!                                └─────────────────────┘
//! ```
//!
//! - `adapter`: strips schema keys the model backend rejects
//! - `interpreter`: decides between a tool call and a direct answer
//! - `dispatcher`: runs the call and normalizes its output to text

pub mod adapter;
pub mod dispatcher;
pub mod interpreter;

pub use adapter::{adapt, AdaptError};
pub use dispatcher::{dispatch, dispatch_listed, normalize_output, DispatchError};
pub use interpreter::{interpret, Interpretation};
