//! Three-stage review workflow.
//!
//! A [`WorkflowSession`] moves through [`Step::Extract`], [`Step::Review`]
//! and [`Step::Finalize`], caching each stage's artifact. Back-navigation
//! is always allowed; forward transitions require the predecessor's
//! artifact and are rejected (leaving the session untouched) otherwise.
//!
//! ```text
//!            generate             confirm_edits
//!  Extract ────────────▶ Review ────────────────▶ Finalize
//!     ▲                  │  ▲                        │
//!     └────── back ──────┘  └───────── back ─────────┘
//! ```
//!
//! Sessions persist alongside the working files:
//!
//! ```text
//! work/
//! ├── holerite.pdf
//! ├── modelo.docx
//! └── peticao.session.json      # WorkflowSession
//! ```

mod persistence;
mod session;

pub use persistence::{session_path, DEFAULT_SESSION_FILE};
pub use session::{Step, WorkflowSession, SESSION_VERSION};
