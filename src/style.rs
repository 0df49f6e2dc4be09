// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::io::{Read, Seek};
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::{
    Extraction, Marker, UncommentRule, comment, extract_blocks, pattern, split_lines,
    uncomment_lines,
};

/// A commenting convention.
///
/// The declaration order is the auto-detection priority order: more
/// specific styles come before the ones whose patterns match broadly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// `/* ... */`
    #[default]
    C,
    /// `// ...`
    CPlusPlus,
    /// `# ...`
    Shell,
    /// `;;;; ...`
    Scheme,
    /// `@c ...`
    Texinfo,
    /// `dnl ...`
    M4,
    /// `-- ...` and `{- ... -}`
    Haskell,
    /// `.\" ...`
    Groff,
    /// `# ...` in PO files
    Gettext,
    /// `C ...` and `! ...`
    Fortran,
    /// `(* ... *)`, `{ ... }` and `// ...`
    Pascal,
    /// `/* ... */` and `// ...`
    Javascript,
}

/// Files where `#` starts a preprocessor directive or a PO entry, not a comment
static HASH_INCLUDE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "f", "f90", "f95", "for", "h", "hh", "hpp", "hxx", "m", "po", "pot",
];

/// Languages where `{` opens code, not a pascal comment
static BRACE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cjs", "cpp", "cs", "css", "cxx", "go", "h", "hh", "hpp", "java", "js", "json",
    "jsx", "mjs", "rs", "ts", "tsx",
];

static JAVASCRIPT_EXTENSIONS: &[&str] = &["cjs", "js", "jsx", "mjs", "ts", "tsx"];
static FORTRAN_EXTENSIONS: &[&str] = &["f", "f90", "f95", "for"];
static GETTEXT_EXTENSIONS: &[&str] = &["po", "pot"];
static M4_EXTENSIONS: &[&str] = &["ac", "m4"];

static BLOCK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Style::ALL
        .iter()
        .map(|style| {
            pattern::compile(style.pattern_source())
                .expect("comment style block pattern is invalid")
        })
        .collect()
});

impl Style {
    /// All styles, in auto-detection order
    pub const ALL: [Style; 12] = [
        Self::C,
        Self::CPlusPlus,
        Self::Shell,
        Self::Scheme,
        Self::Texinfo,
        Self::M4,
        Self::Haskell,
        Self::Groff,
        Self::Gettext,
        Self::Fortran,
        Self::Pascal,
        Self::Javascript,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::CPlusPlus => "c++",
            Self::Shell => "shell",
            Self::Scheme => "scheme",
            Self::Texinfo => "texinfo",
            Self::M4 => "m4",
            Self::Haskell => "haskell",
            Self::Groff => "groff",
            Self::Gettext => "gettext",
            Self::Fortran => "fortran",
            Self::Pascal => "pascal",
            Self::Javascript => "javascript",
        }
    }

    /// Look up a style by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(name.trim()))
    }

    /// What a one-line comment looks like in this style
    pub fn example(self) -> &'static str {
        match self {
            Self::C => "/* foo */",
            Self::CPlusPlus | Self::Javascript => "// foo",
            Self::Shell | Self::Gettext => "# foo",
            Self::Scheme => ";;;; foo",
            Self::Texinfo => "@c foo",
            Self::M4 => "dnl foo",
            Self::Haskell => "-- foo",
            Self::Groff => ".\\\" foo",
            Self::Fortran => "C foo",
            Self::Pascal => "(* foo *)",
        }
    }

    fn pattern_source(self) -> &'static str {
        match self {
            Self::C => r"/\*([^*]|[\r\n]|(\*+([^*/]|[\r\n])))*\*+/",
            Self::CPlusPlus => r"(^//.*[\r\n])*",
            Self::Shell => r"(^#.*[\r\n])*",
            Self::Scheme => r"(^;.*[\r\n])*",
            Self::Texinfo => r"((^@comment[ ]|^@c[ ]).*[\r\n]|(^@comment[\r\n]|^@c[\r\n]))*",
            Self::M4 => r"((^[Dd][Nn][Ll][ \t]|^#).*[\r\n]|^[Dd][Nn][Ll][\r\n])*",
            Self::Haskell => r"(\{-([^-]|[\r\n]|(-+([^-\}]|[\r\n])))*-+\}|(^--.*[\r\n])+)",
            Self::Groff => r#"((^\.\\#|^\\#|^\.\\"|^\\").*[\r\n])*"#,
            Self::Gettext => r"((^#[ .:,|].*|^#)[\r\n])*",
            Self::Fortran => r"((^C[ ]|^![ ]).*[\r\n]|(^C[\r\n]|^![\r\n]))*",
            Self::Pascal => {
                r"(\{([.*]|[\r\n]|[^*\}])*\}|\(\*([^*]|[\r\n]|(\*+([^*\)]|[\r\n])))*\*+\)|^//.*)"
            }
            Self::Javascript => r"(/\*([^*]|[\r\n]|(\*+([^*/]|[\r\n])))*\*+/|^//.*)",
        }
    }

    /// The pattern recognizing one or more whole comment chunks at the
    /// start of the text
    pub fn block_pattern(self) -> &'static Regex {
        &BLOCK_PATTERNS[self as usize]
    }

    /// Extensions (without the dot) this style is limited to, if any
    pub fn supported_extensions(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Javascript => Some(JAVASCRIPT_EXTENSIONS),
            Self::Fortran => Some(FORTRAN_EXTENSIONS),
            Self::Gettext => Some(GETTEXT_EXTENSIONS),
            Self::M4 => Some(M4_EXTENSIONS),
            _ => None,
        }
    }

    /// Extensions (without the dot) this style never claims
    pub fn avoided_extensions(self) -> Option<&'static [&'static str]> {
        match self {
            Self::C | Self::CPlusPlus => Some(JAVASCRIPT_EXTENSIONS),
            Self::Shell => Some(HASH_INCLUDE_EXTENSIONS),
            Self::Pascal => Some(BRACE_EXTENSIONS),
            _ => None,
        }
    }

    /// Check if this style is a detection candidate for the file.
    ///
    /// A style applies when it has no allow-list or the extension is on it,
    /// and the extension is not on its deny-list.
    pub fn matches_extension(self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|x| x.to_str())
            .map(|x| x.to_ascii_lowercase());
        let listed = |list: &[&str]| match &ext {
            Some(ext) => list.binary_search(&ext.as_str()).is_ok(),
            None => false,
        };
        let supported = self.supported_extensions().is_none_or(listed);
        let avoided = self.avoided_extensions().is_some_and(listed);
        supported && !avoided
    }

    /// How new comments are generated
    pub fn marker(self) -> Marker {
        match self {
            Self::C => Marker::Block {
                open: "/*",
                close: "*/",
            },
            Self::Pascal => Marker::Block {
                open: "(*",
                close: "*)",
            },
            Self::CPlusPlus | Self::Javascript => Marker::Line("//"),
            Self::Shell | Self::Gettext => Marker::Line("#"),
            Self::Scheme => Marker::Line(";;;;"),
            Self::Texinfo => Marker::Line("@c"),
            Self::M4 => Marker::Line("dnl"),
            Self::Haskell => Marker::Line("--"),
            Self::Groff => Marker::Line(".\\\""),
            Self::Fortran => Marker::Line("C"),
        }
    }

    /// Delimiter stripping passes, applied in order
    pub fn uncomment_rules(self) -> &'static [UncommentRule] {
        const C: &[UncommentRule] = &[UncommentRule::charset("/*")];
        const SLASHES: &[UncommentRule] = &[UncommentRule::literal("//")];
        const HASH: &[UncommentRule] = &[UncommentRule::charset("#")];
        const SCHEME: &[UncommentRule] = &[UncommentRule::charset(";")];
        const TEXINFO: &[UncommentRule] =
            &[UncommentRule::literal("@comment").or_literal("@c")];
        const M4: &[UncommentRule] = &[UncommentRule::literal("dnl")];
        const HASKELL: &[UncommentRule] = &[UncommentRule::charset("-").or_charset("{-}")];
        const GROFF: &[UncommentRule] = &[
            UncommentRule::literal("\\#").or_literal(".\\#"),
            UncommentRule::literal(".\\\"").or_literal("\\\""),
        ];
        const FORTRAN: &[UncommentRule] = &[UncommentRule::literal("C").or_literal("!")];
        const PASCAL: &[UncommentRule] = &[
            UncommentRule::charset("{*}").or_literal("//"),
            UncommentRule::charset("(*)").or_literal("//"),
        ];
        match self {
            Self::C => C,
            Self::CPlusPlus | Self::Javascript => SLASHES,
            Self::Shell | Self::Gettext => HASH,
            Self::Scheme => SCHEME,
            Self::Texinfo => TEXINFO,
            Self::M4 => M4,
            Self::Haskell => HASKELL,
            Self::Groff => GROFF,
            Self::Fortran => FORTRAN,
            Self::Pascal => PASCAL,
        }
    }

    /// Extract the leading comment blocks from the stream, capturing a
    /// hashbang line if there is one.
    pub fn extract<R: Read + Seek>(self, reader: &mut R) -> Extraction {
        extract_blocks(reader, self.block_pattern(), true)
    }

    /// Wrap text into a comment of this style
    pub fn comment(self, text: Option<&str>) -> String {
        comment(text, self.marker())
    }

    /// Strip this style's delimiters from one raw comment block
    pub fn uncomment_block(self, block: &[u8], trim: bool) -> Vec<u8> {
        let mut lines = split_lines(block);
        for rule in self.uncomment_rules() {
            lines = uncomment_lines(lines, rule, trim);
        }
        lines.join(&b'\n')
    }

    /// Strip this style's delimiters from every block
    pub fn uncomment(self, blocks: &[Vec<u8>], trim: bool) -> Vec<Vec<u8>> {
        blocks
            .iter()
            .map(|block| self.uncomment_block(block, trim))
            .collect()
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let names: Vec<_> = Self::ALL.iter().map(|x| x.name()).collect();
            format!(
                "unknown comment style '{s}', expected one of: {}",
                names.join(", ")
            )
        })
    }
}
