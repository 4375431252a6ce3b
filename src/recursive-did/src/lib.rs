pub mod block;
pub mod bundle;
pub mod inscription;
pub mod inscription_id;
pub mod page;
pub mod sat;

pub use block::{BlockInfo, BlockQuery};
pub use bundle::InscriptionBundle;
pub use inscription::Inscription;
pub use inscription_id::{InscriptionId, ParseIdError};
pub use page::Page;
pub use sat::{Sat, SatInscription};
