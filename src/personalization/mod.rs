//! Polish grammar helpers used to personalize outreach messages.
//!
//! Everything here is pure and infallible: inputs that no rule recognises
//! come back unchanged (or empty for empty input), so callers cannot tell
//! "nothing to do" apart from "could not decline". For display text that is
//! acceptable.
//!
//! The declension engine is a heuristic over Polish morphology. It follows
//! its rule tables faithfully and will mis-decline inputs those tables do not
//! anticipate; it is also not idempotent.

pub mod locative;
pub mod phone;
pub mod rules;
pub mod template;
pub mod vocative;

pub use locative::decline_city_to_locative;
pub use phone::format_phone_number;
pub use template::{Personalization, personalize};
pub use vocative::decline_name_to_vocative;
