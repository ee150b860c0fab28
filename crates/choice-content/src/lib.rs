//! Path-addressed choice documents and selection chain resolution
//!
//! A choice document is a nested mapping in which some mappings are
//! *choice groups*: a `selection` key naming the chosen sibling option, plus
//! the options themselves. An option is either a terminal value or a nested
//! group carrying its own `value` and sub-choices.
//!
//! # Examples
//!
//! ```
//! use choice_content::{ConfigDocument, SelectionResolver};
//! use choice_store::MemoryStore;
//! use serde_json::json;
//!
//! let store = MemoryStore::from_value(json!({
//!     "mode": {
//!         "selection": "fast",
//!         "fast": 10,
//!         "slow": {"value": 20, "selection": "a", "a": 1, "b": 2}
//!     }
//! }));
//! let doc = ConfigDocument::new(&store);
//! let resolver = SelectionResolver::new(&doc);
//!
//! assert_eq!(resolver.resolve("mode").unwrap(), vec![json!(10)]);
//!
//! doc.write(["mode", "selection"], "slow").unwrap();
//! assert_eq!(resolver.resolve("mode").unwrap(), vec![json!(20), json!(1)]);
//! ```

pub mod document;
pub mod error;
pub mod flat;
pub mod path;
pub mod selection;
pub mod shape;

pub use document::ConfigDocument;
pub use error::{Error, Result};
pub use flat::FlatDocument;
pub use path::KeyPath;
pub use selection::{SELECTION_KEY, SelectionResolver, VALUE_KEY};
pub use shape::{ChoiceGroup, ChoiceOption, OptionKind};
