// C array rendering
// Serializes a clip's samples as a `const uint8_t` declaration for the firmware header

use std::io::{self, Write};

/// Prefix shared by every generated symbol
pub const SYMBOL_PREFIX: &str = "audio_";

/// Element type of every generated table
pub const ELEMENT_TYPE: &str = "uint8_t";

/// A newline follows every element whose index is a multiple of this
pub const WRAP_EVERY: usize = 32;

/// Build the C symbol for a vocabulary suffix (`zero` -> `audio_zero`)
pub fn symbol_name(suffix: &str) -> String {
    format!("{}{}", SYMBOL_PREFIX, suffix)
}

/// Render one declaration, including the trailing blank line
///
/// The element list follows the firmware header's historical layout: for each
/// index the value is written, then a comma unless it is the last element,
/// then a newline when `index % 32 == 0`. Index 0 therefore always ends its
/// line. Values are written verbatim, without range checks.
pub fn render_declaration(symbol: &str, samples: &[i32]) -> String {
    // "255," plus the occasional newline
    let mut out = String::with_capacity(symbol.len() + 32 + samples.len() * 5);

    out.push_str(&format!("const {} {}[] = {{", ELEMENT_TYPE, symbol));
    let last = samples.len().saturating_sub(1);
    for (i, value) in samples.iter().enumerate() {
        out.push_str(&value.to_string());
        if i < last {
            out.push(',');
        }
        if i % WRAP_EVERY == 0 {
            out.push('\n');
        }
    }
    out.push_str("};\n\n");

    out
}

/// Stream a declaration into `writer`; produces the same bytes as [`render_declaration`]
pub fn write_declaration<W: Write>(writer: &mut W, symbol: &str, samples: &[i32]) -> io::Result<()> {
    writer.write_all(render_declaration(symbol, samples).as_bytes())
}

/// Parse the element list of a rendered declaration back into values
///
/// Returns `None` when the text is not a declaration of this shape.
pub fn parse_elements(declaration: &str) -> Option<Vec<i32>> {
    let open = declaration.find('{')?;
    let close = declaration.rfind('}')?;
    if close < open {
        return None;
    }

    let body = &declaration[open + 1..close];
    if body.trim().is_empty() {
        return Some(Vec::new());
    }

    body.split(',')
        .map(|item| item.trim().parse::<i32>().ok())
        .collect()
}
