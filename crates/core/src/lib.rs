//! Core types and pure logic for range synchronisation.
//!
//! Nothing in this crate performs I/O. It provides:
//!
//! - [`cell`]: the cell/row model exchanged with the spreadsheet store.
//! - [`dates`]: lenient date parsing and the inclusive [`dates::DateBound`].
//! - [`filter`]: the date-column row filter.
//! - [`normalize`]: the text-marker normalization strategies.
//! - [`location`]: sheet/range addressing and read/write modes.
//! - [`store`]: the [`store::ValueStore`] trait implemented by store clients.
//! - [`import`]: request/outcome types of one import run.

pub mod cell;
pub mod dates;
pub mod error;
pub mod filter;
pub mod import;
pub mod location;
pub mod normalize;
pub mod store;
