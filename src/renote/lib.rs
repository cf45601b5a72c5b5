//! # Renote Architecture
//!
//! Renote renumbers footnote identifiers across a set of markup documents.
//! A definition document (`FN.xml`) carries note openings such as
//! `<p xml:id="note-345.6.3">`; dependent documents link to them with strings
//! like `FN.html#note-345.6.3"/>`. Renote gives every identifier a dense
//! sequential replacement (`note-1`, `note-2`, ...) in the order they appear,
//! rewrites definitions and links alike, then re-scans the definition document
//! to confirm nothing was missed.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, sets up logging, prints messages       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - discover, apply, verify and the combined renumber        │
//! │  - Returns `CmdResult`s, never prints                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (editor.rs, mapper.rs, mapping.rs, policy.rs)         │
//! │  - Text buffers, mapping derivation, rewrite policies       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Three Passes
//!
//! 1. **Discover**: [`mapper::NoteMapper`] scans the definition document and
//!    persists an ordered [`mapping::NoteMapping`] (`data.json`).
//! 2. **Apply**: every configured document is loaded into an
//!    [`editor::TextEditor`], rewritten by its [`policy::SubstitutionPolicy`]
//!    and saved.
//! 3. **Verify**: the mapping is derived again from the rewritten definition
//!    document. Any entry that does not map to itself is reported.
//!
//! Running the passes on an already renumbered set of documents changes
//! nothing: the derived mapping is the identity.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per pass, plus config and init
//! - [`editor`]: In-memory text buffer with literal and pattern replace
//! - [`mapper`]: Mapping derivation
//! - [`mapping`]: The ordered old → new table and its JSON form
//! - [`policy`]: Reference-link and definition-site rewrites
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: `renote.json` settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod mapper;
pub mod mapping;
pub mod policy;
pub mod store;
