use recursive_did::InscriptionId;
use serde::{Deserialize, Serialize};

/// One named block of display lines, as stored in a cartridge's
/// `functions` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub name: String,
    pub lines: Vec<String>,
}

/// One numbered entry of the collection roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub number: u64,
    pub id: InscriptionId,
}

/// Mutable state of one compositor run.
///
/// There is no ambient storage: everything a step produces is written here
/// through a method, and later steps read it back from the same object.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    link: InscriptionId,
    panels: Vec<Panel>,
    roster: Vec<RosterEntry>,
    layers: Vec<String>,
}

impl Session {
    /// `default_link` is where a click on the composite navigates unless a
    /// cartridge overrides it.
    pub fn new(default_link: InscriptionId) -> Self {
        Self {
            link: default_link,
            panels: Vec::new(),
            roster: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn link(&self) -> &InscriptionId {
        &self.link
    }

    pub fn set_link(&mut self, link: InscriptionId) {
        self.link = link;
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn set_panels(&mut self, panels: Vec<Panel>) {
        self.panels = panels;
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn set_roster(&mut self, roster: Vec<RosterEntry>) {
        self.roster = roster;
    }

    /// Content URLs of the composite, bottom layer first.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    pub fn set_layers(&mut self, layers: Vec<String>) {
        self.layers = layers;
    }
}
