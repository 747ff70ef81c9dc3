//! Static site content
//!
//! Cast roster, production credits, and hero copy. Compiled in; never
//! mutated at runtime.

use crate::models::{CastMember, CreditEntry};

pub const STUDIO: &str = "SILVER SPARK";
pub const STUDIO_SUFFIX: &str = "FILMS";
pub const SERIES_TITLE: &str = "RED LOTUS";
pub const SERIES_KICKER: &str = "SSF Original Series";
pub const TAGLINE: &str = "\"The bloom is beautiful, but the roots are hidden in the dark.\"";
pub const FOOTER_PITCH: &str = "Stay connected for early access to our newest films and events.";
pub const FOOTER_BRAND: &str = "Silver Spark Films";

pub static CAST: [CastMember; 7] = [
    CastMember { role: "NIKHIL", actor: "PRIYANSHU", image: "Priyanshu.jpg" },
    CastMember { role: "AKSHAY", actor: "SHALOM REDDY", image: "Shalom.jpg" },
    CastMember { role: "VARUN", actor: "SAMUEL", image: "Samuel.jpg" },
    CastMember { role: "AMAN", actor: "ARYAN PAWAR", image: "Aryan.jpg" },
    CastMember { role: "ADITYA", actor: "VEDANT NAMBIAR", image: "Vedant.jpg" },
    CastMember { role: "SUNIL", actor: "ANJANAY", image: "Anjanay.jpg" },
    CastMember { role: "DEV", actor: "SATYAM", image: "Satyam.jpg" },
];

pub static CREW: [CreditEntry; 11] = [
    CreditEntry {
        title: "WRITER, DIRECTOR & SCREENPLAY",
        names: &["PRIYANSHU @rednose.noir"],
        image: Some("Priyanshu.jpg"),
        featured: false,
    },
    CreditEntry { title: "CO-WRITER", names: &["CHAITRAKSHI"], image: None, featured: false },
    CreditEntry {
        title: "ASSISTANT DIRECTOR",
        names: &["VEDANT NAMBIAR @pov_notvdt"],
        image: Some("Vedant.jpg"),
        featured: false,
    },
    CreditEntry {
        title: "CAMERAMAN & VISUALS",
        names: &["VAIBHAV @calm_vaibhav", "ARYAN PAWAR @aryanpawar.16"],
        image: None,
        featured: false,
    },
    CreditEntry { title: "ART DIRECTOR", names: &["SHREYAS @shreyasdanane"], image: None, featured: false },
    CreditEntry {
        title: "DIALOGUE WRITERS",
        names: &["SHALOM REDDY @reddy_shalom", "ARYAN PAWAR"],
        image: Some("Shalom.jpg"),
        featured: true,
    },
    CreditEntry {
        title: "MUSIC DIRECTOR & BGM",
        names: &["SAMUEL @smamuel_music1"],
        image: Some("Samuel.jpg"),
        featured: false,
    },
    CreditEntry {
        title: "EDITING & LIGHT CGI PART",
        names: &["ANJANAY @laxus_am", "ARYAN PAWAR", "AKSHAT @cf.vxpor"],
        image: Some("Anjanay.jpg"),
        featured: false,
    },
    CreditEntry { title: "VISUALIZER & VISUALS", names: &["PRIYANSHU"], image: Some("Priyanshu.jpg"), featured: false },
    CreditEntry { title: "LOCATIONS OF SHOOT", names: &["BADLAPUR", "AMBARNATH"], image: None, featured: false },
    CreditEntry { title: "WEB DEVELOPER", names: &["LUFFY__4567 @luffy__4567"], image: None, featured: true },
];

/// Look up a cast member by the character they play (case-insensitive)
pub fn cast_by_role(role: &str) -> Option<&'static CastMember> {
    CAST.iter().find(|m| m.role.eq_ignore_ascii_case(role))
}
