//! LSP feature implementations backed by the static API catalog
//!
//! Both features are stateless dispatch routines: each invocation is a pure
//! function of the host-supplied context and the immutable catalog.

pub mod completion;
pub mod hover;
