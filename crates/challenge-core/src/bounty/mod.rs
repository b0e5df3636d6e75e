//! Sub-colección de bounties del draft.
//!
//! - `BountyCollection`: lista ordenada, autoridad del lado cliente.
//! - `BountyPolicy`: límites opcionales (cantidad, puntos, total).
//! - `BountyTable`: filas derivadas de la colección (tabla y resumen).
//! - `BountyForm`: estado del sub-formulario antes de confirmar.
//! - `render`: markup HTML escapado de la tabla y del resumen.

mod collection;
mod form;
mod policy;
pub mod render;
mod table;

pub use collection::BountyCollection;
pub use form::BountyForm;
pub use policy::BountyPolicy;
pub use render::escape_html;
pub use table::{BountyRow, BountyTable, ReviewSummary};
