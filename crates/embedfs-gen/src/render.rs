//! Render a captured manifest as Rust source.
//!
//! The output is a single `pub mod <module>` holding a lazily built
//! `ManifestFs` with one `add` call per entry, in capture order. Include it
//! with `include!` or drop it into `src/` as a module file.

use crate::capture::{CapturedEntry, Manifest};

/// Bytes per line in embedded byte-string literals.
const BYTES_PER_LINE: usize = 32;

/// Render settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Name of the generated module. Sanitized before use.
    pub module: String,
}

/// Render `manifest` as a Rust module.
///
/// Output depends only on the manifest and the module name.
pub fn render(manifest: &Manifest, opts: &RenderOptions) -> String {
    let module = sanitize_module_name(&opts.module);
    let mut out = String::new();

    out.push_str("// Code generated by embedfs-gen. DO NOT EDIT.\n\n");
    out.push_str(&format!("pub mod {module} {{\n"));
    out.push_str("    #![allow(unused_imports)]\n\n");
    out.push_str("    use std::sync::LazyLock;\n");
    out.push_str("    use std::time::{Duration, UNIX_EPOCH};\n\n");
    out.push_str("    use embedfs::{ContentProducer, ManifestFs, Vfs};\n\n");
    out.push_str("    static MANIFEST: LazyLock<ManifestFs> = LazyLock::new(|| {\n");
    out.push_str("        let mut fs = ManifestFs::new();\n");
    for entry in &manifest.entries {
        render_entry(&mut out, entry);
    }
    out.push_str("        fs\n");
    out.push_str("    });\n\n");
    out.push_str("    /// The embedded filesystem.\n");
    out.push_str("    pub fn fs() -> &'static dyn Vfs {\n");
    out.push_str("        &*MANIFEST\n");
    out.push_str("    }\n\n");
    out.push_str("    /// The embedded manifest itself.\n");
    out.push_str("    pub fn manifest() -> &'static ManifestFs {\n");
    out.push_str("        &MANIFEST\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn render_entry(out: &mut String, entry: &CapturedEntry) {
    out.push_str("        fs.add(\n");
    out.push_str(&format!("            {:?},\n", entry.path));
    out.push_str(&format!("            {},\n", entry.size));
    out.push_str(&format!("            {:#o},\n", entry.mode));
    out.push_str(&format!(
        "            UNIX_EPOCH + Duration::from_secs({}),\n",
        entry.mtime_secs
    ));
    out.push_str(&format!("            {},\n", entry.is_dir));
    match &entry.content {
        Some(data) if !entry.is_dir => {
            out.push_str("            Some(ContentProducer::gzip_static(\n");
            out.push_str(&format!(
                "                {},\n",
                byte_literal(data, "                  ")
            ));
            out.push_str("            )),\n");
        }
        _ => out.push_str("            None,\n"),
    }
    out.push_str("        );\n");
}

/// Escape every byte as `\xNN` inside a `b"..."` literal.
///
/// Long payloads are split with `\`-newline continuations; `indent` is the
/// whitespace placed before each continued line (the compiler skips it).
pub fn byte_literal(bytes: &[u8], indent: &str) -> String {
    let mut out = String::with_capacity(bytes.len() * 4 + 3);
    out.push_str("b\"");
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            out.push_str("\\\n");
            out.push_str(indent);
        }
        for b in chunk {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out.push('"');
    out
}

/// Turn an arbitrary name into a Rust identifier.
///
/// Non-identifier characters become `_`; a leading digit gets a `_`
/// prefix; an empty name becomes `embedded`. Keywords are made raw,
/// except path keywords like `self`, which get a trailing `_`.
pub fn sanitize_module_name(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.chars().all(|c| c == '_') {
        return "embedded".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if matches!(ident.as_str(), "self" | "super" | "crate" | "Self") {
        // Path keywords cannot be raw identifiers
        ident.push('_');
    } else if is_keyword(&ident) {
        ident.insert_str(0, "r#");
    }
    ident
}

fn is_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "as" | "async" | "await" | "break" | "const" | "continue" | "dyn" | "else" | "enum"
            | "extern" | "false" | "fn" | "for" | "gen" | "if" | "impl" | "in" | "let"
            | "loop" | "match" | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "static"
            | "struct" | "trait" | "true" | "type" | "unsafe" | "use" | "where" | "while"
            | "abstract" | "become" | "box" | "do" | "final" | "macro" | "override" | "priv"
            | "try" | "typeof" | "unsized" | "virtual" | "yield"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Manifest {
        Manifest {
            entries: vec![
                CapturedEntry {
                    path: "/".to_string(),
                    size: 96,
                    mode: 0o40755,
                    mtime_secs: 0,
                    is_dir: true,
                    content: None,
                },
                CapturedEntry {
                    path: "/a \"quoted\".txt".to_string(),
                    size: 2,
                    mode: 0o100644,
                    mtime_secs: 1_541_921_416,
                    is_dir: false,
                    content: Some(vec![0x1f, 0x8b, 0x00]),
                },
            ],
        }
    }

    #[test]
    fn test_byte_literal() {
        assert_eq!(byte_literal(&[0x1f, 0x8b, 0x0a], ""), r#"b"\x1f\x8b\x0a""#);
        assert_eq!(byte_literal(&[], ""), r#"b"""#);
    }

    #[test]
    fn test_byte_literal_wraps() {
        let data = vec![0xffu8; BYTES_PER_LINE + 1];
        let literal = byte_literal(&data, "  ");
        let lines: Vec<_> = literal.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with('\\'));
        assert_eq!(lines[1], r#"  \xff""#);
    }

    #[test]
    fn test_sanitize_module_name() {
        assert_eq!(sanitize_module_name("assets"), "assets");
        assert_eq!(sanitize_module_name("my-assets.v2"), "my_assets_v2");
        assert_eq!(sanitize_module_name("2024"), "_2024");
        assert_eq!(sanitize_module_name(""), "embedded");
        assert_eq!(sanitize_module_name("--"), "embedded");
        assert_eq!(sanitize_module_name("static"), "r#static");
        assert_eq!(sanitize_module_name("self"), "self_");
    }

    #[test]
    fn test_render_entries() {
        let source = render(
            &sample(),
            &RenderOptions {
                module: "web-assets".to_string(),
            },
        );

        assert!(source.starts_with("// Code generated by embedfs-gen. DO NOT EDIT.\n"));
        assert!(source.contains("pub mod web_assets {\n"));
        assert!(source.contains(
            "        fs.add(\n            \"/\",\n            96,\n            0o40755,\n            UNIX_EPOCH + Duration::from_secs(0),\n            true,\n            None,\n        );\n"
        ));
        assert!(source.contains(r#"            "/a \"quoted\".txt","#));
        assert!(source.contains("            0o100644,\n"));
        assert!(source.contains("Duration::from_secs(1541921416)"));
        assert!(source.contains(r#"                b"\x1f\x8b\x00","#));
        assert!(source.contains("pub fn fs() -> &'static dyn Vfs {"));
    }

    #[test]
    fn test_render_deterministic() {
        let opts = RenderOptions {
            module: "assets".to_string(),
        };
        assert_eq!(render(&sample(), &opts), render(&sample(), &opts));
    }
}
