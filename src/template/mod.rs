//! Reference substitution for templates
//!
//! A template is turned into plain markup by replacing every interpolated
//! value with a placeholder token (`$fig-0`, `$fig-1`, ...). After the markup
//! has been parsed, the feeder swaps the tokens back for the original values,
//! so values that have no textual form (callbacks, pre-built elements)
//! survive the trip through the parser.
//!
//! # Example
//!
//! ```rust
//! use fig_html::template::{compose, feed, PlaceholderCounter, Template};
//! use fig_html::{FalsyPolicy, Value};
//!
//! let counter = PlaceholderCounter::new();
//! let template = Template::<()>::literal("<p>").value(42).text("</p>");
//! let comp = compose(template, &counter, true);
//! assert_eq!(comp.markup, "<p>$fig-0</p>");
//!
//! let restored = feed("$fig-0", &comp.references, FalsyPolicy::Drop);
//! assert_eq!(restored, vec![Value::Number(42.0)]);
//! ```

mod composer;
mod feeder;

pub use composer::{
    compose, Composition, PlaceholderCounter, References, Template, PLACEHOLDER_PREFIX,
};
pub use feeder::feed;
