//! Compiler-flag adapter.
//!
//! Callers hand the driver a compiler-style flag string with a two-character
//! prefix (`-F` style, as emitted by the build scripts). The introspector
//! wants the flags wrapped in its own `--gccxml-cxxflags` option.

/// Option the introspector reads extra compiler flags from.
pub const CXXFLAGS_OPTION: &str = "--gccxml-cxxflags";

/// Convert a raw `--compiler-flags` value into introspector form.
///
/// 1. The first two characters are dropped.
/// 2. Every backslash in the rest is removed.
/// 3. The result is wrapped as `--gccxml-cxxflags "<rest>"`.
///
/// Step 2 is lossy: Windows paths such as `-IC:\sdk\include` come out as
/// `-IC:sdkinclude`. Build scripts currently rely on it to undo their own
/// escaping, so it is kept.
///
/// ```
/// use slon_bindgen::flags::adapt_compiler_flags;
///
/// assert_eq!(
///     adapt_compiler_flags(r"x\\--some\\flags\\here"),
///     r#"--gccxml-cxxflags "--someflagshere""#,
/// );
/// ```
pub fn adapt_compiler_flags(raw: &str) -> String {
    let rest: String = raw.chars().skip(2).filter(|&c| c != '\\').collect();
    format!("{CXXFLAGS_OPTION} \"{rest}\"")
}

/// Split an adapted flag string into process arguments.
///
/// Whitespace separates arguments; double quotes group and are removed. An
/// empty quoted argument (`""`) is kept. Backslashes carry no meaning here
/// since [`adapt_compiler_flags`] has already removed them.
pub fn split_flags(flags: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quoted = false;

    for c in flags.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_arg = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}
