//! IGV session file generation.
//!
//! Files in `IGVnav` are classified by name ([`classify`]), rendered into XML
//! fragments ([`fragments`]), and spliced into master templates
//! ([`template`]) by [`builder::build_sessions`].

pub mod builder;
pub mod classify;
pub mod fragments;
pub mod template;
