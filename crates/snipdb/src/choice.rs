//! Closed vocabularies for `Snippet::language` and `Snippet::style`.
//!
//! Each enum carries a matching `ChoiceSet` so the schema layer can check
//! wire values without knowing the Rust type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snipdb_schema::types::ChoiceSet;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// UnknownChoice
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("\"{value}\" is not a valid {set}")]
pub struct UnknownChoice {
    pub set: &'static str,
    pub value: String,
}

///
/// choices
///
/// Declares a unit enum together with its wire names and `ChoiceSet`.
/// Wire names must be listed in sorted order.
///

macro_rules! choices {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $set:ident {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        $vis enum $name {
            $( $variant, )+
        }

        #[doc = concat!("Wire names of every [`", stringify!($name), "`].")]
        $vis static $set: ChoiceSet = ChoiceSet {
            ident: stringify!($name),
            values: &[$( $wire ),+],
        };

        impl $name {
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    _ => Err(UnknownChoice {
                        set: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choices! {
    /// Lexer used to highlight a snippet.
    pub enum Language in LANGUAGE_SET {
        Bash => "bash",
        C => "c",
        Clojure => "clojure",
        Cpp => "cpp",
        Csharp => "csharp",
        Css => "css",
        Dart => "dart",
        Diff => "diff",
        Dockerfile => "dockerfile",
        Elixir => "elixir",
        Erlang => "erlang",
        Go => "go",
        Haskell => "haskell",
        Html => "html",
        Ini => "ini",
        Java => "java",
        Javascript => "javascript",
        Json => "json",
        Julia => "julia",
        Kotlin => "kotlin",
        Lua => "lua",
        Make => "make",
        Markdown => "markdown",
        Nginx => "nginx",
        ObjectiveC => "objective-c",
        Ocaml => "ocaml",
        Perl => "perl",
        Php => "php",
        Powershell => "powershell",
        Python => "python",
        Python2 => "python2",
        R => "r",
        Ruby => "ruby",
        Rust => "rust",
        Scala => "scala",
        Scss => "scss",
        Sql => "sql",
        Swift => "swift",
        Text => "text",
        Toml => "toml",
        Typescript => "typescript",
        Vim => "vim",
        Xml => "xml",
        Yaml => "yaml",
    }
}

choices! {
    /// Colour scheme used to render a highlighted snippet.
    pub enum Style in STYLE_SET {
        Abap => "abap",
        Algol => "algol",
        AlgolNu => "algol_nu",
        Arduino => "arduino",
        Autumn => "autumn",
        Borland => "borland",
        Bw => "bw",
        Colorful => "colorful",
        Default => "default",
        Emacs => "emacs",
        Friendly => "friendly",
        Fruity => "fruity",
        Igor => "igor",
        Inkpot => "inkpot",
        Lovelace => "lovelace",
        Manni => "manni",
        Monokai => "monokai",
        Murphy => "murphy",
        Native => "native",
        ParaisoDark => "paraiso-dark",
        ParaisoLight => "paraiso-light",
        Pastie => "pastie",
        Perldoc => "perldoc",
        RainbowDash => "rainbow_dash",
        Rrt => "rrt",
        Sas => "sas",
        SolarizedDark => "solarized-dark",
        SolarizedLight => "solarized-light",
        Stata => "stata",
        StataDark => "stata-dark",
        StataLight => "stata-light",
        Tango => "tango",
        Trac => "trac",
        Vim => "vim",
        Vs => "vs",
        Xcode => "xcode",
        Zenburn => "zenburn",
    }
}

pub const DEFAULT_LANGUAGE: Language = Language::Python;
pub const DEFAULT_STYLE: Style = Style::Friendly;

impl Default for Language {
    fn default() -> Self {
        DEFAULT_LANGUAGE
    }
}

impl Default for Style {
    fn default() -> Self {
        DEFAULT_STYLE
    }
}

///
/// TESTS
///
