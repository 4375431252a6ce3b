//! Asset selection for trait-composited inscription collections.
//!
//! A collection piece stores its traits in CBOR metadata; the actual layer
//! images are separate inscriptions, looked up through a [`TraitDictionary`].
//! This crate turns the metadata into an ordered layer plan (the content
//! URLs to stack), loads the optional "cartridge" inscription that carries
//! interactive panels, and assembles the collection roster. All mutable
//! state lives in an explicit [`Session`] passed through the calls; there is
//! no ambient storage.

pub mod cartridge;
pub mod collection;
pub mod compositor;
pub mod dictionary;
pub mod error;
pub mod session;

pub use cartridge::{load_cartridge, traits_panel, Cartridge};
pub use collection::load_collection;
pub use compositor::{compose_piece, composite_plan};
pub use dictionary::TraitDictionary;
pub use error::CompositorError;
pub use session::{Panel, RosterEntry, Session};
