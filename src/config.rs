//! Build and output options.

/// Upper bounds on the bit width accepted by the sized `load`/`store`
/// variants of the integer types.
///
/// The defaults are narrower than the natural widths of the types.
///
/// ```
/// # use watgen::config::WidthCaps;
/// let caps = WidthCaps::default();
/// assert_eq!(caps.i32, 16);
/// assert_eq!(caps.i64, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthCaps {
    pub i32: u32,
    pub i64: u32,
}

impl Default for WidthCaps {
    fn default() -> Self {
        Self { i32: 16, i64: 32 }
    }
}

/// Layout options of the S-expression formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    /// Spaces added per nesting level when a list is broken across lines.
    pub indent: usize,
    /// Lists with a nesting height up to this value are kept on one line.
    pub inline_height: usize,
    /// Lists with one of these tags put each child on its own line whatever
    /// their height.
    pub break_tags: &'static [&'static str],
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            inline_height: 3,
            break_tags: &["module"],
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    pub caps: WidthCaps,
    pub format: FormatOptions,
}
