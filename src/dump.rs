use std::fmt::Write as _;

use crate::value::Amf0Value;

const INDENT: &str = "    ";

impl Amf0Value {
    /// Render a deterministic, human-readable dump of the value tree.
    ///
    /// Scalars print as a single `Kind payload` line; containers print a
    /// `Kind (<n> items)` summary followed by their children, one
    /// indentation level deeper per nesting level. Every line ends with a
    /// newline.
    pub fn human_print(&self) -> String {
        let mut out = String::new();
        self.print_into(&mut out, 0);
        out
    }

    fn print_into(&self, out: &mut String, level: usize) {
        match self {
            Self::Number(n) => {
                let _ = writeln!(out, "Number {n:?}");
            }
            Self::Boolean(b) => {
                let _ = writeln!(out, "Boolean {b}");
            }
            Self::String(s) => {
                let _ = writeln!(out, "String {s}");
            }
            Self::Object(o) => {
                let _ = writeln!(out, "Object ({} items)", o.len());
                for (name, value) in o.iter() {
                    push_indent(out, level + 1);
                    let _ = write!(out, "Property '{name}' ");
                    value.print_into(out, level + 1);
                }
            }
            Self::Null => out.push_str("Null\n"),
            Self::Undefined => out.push_str("Undefined\n"),
            Self::EcmaArray(a) => {
                let _ = writeln!(out, "EcmaArray ({} items)", a.len());
                for (name, value) in a.iter() {
                    push_indent(out, level + 1);
                    let _ = write!(out, "Property '{name}' ");
                    value.print_into(out, level + 1);
                }
            }
            Self::ObjectEnd => out.push_str("ObjectEnd\n"),
            Self::StrictArray(v) => {
                let _ = writeln!(out, "StrictArray ({} items)", v.len());
                for value in v {
                    push_indent(out, level + 1);
                    out.push_str("Elem ");
                    value.print_into(out, level + 1);
                }
            }
            Self::Date(d) => {
                let _ = writeln!(out, "Date {}/{}", d.millis, d.timezone);
            }
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}
