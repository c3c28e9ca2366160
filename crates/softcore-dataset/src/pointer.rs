//! JSON pointer helpers
//!
//! Records are addressed with RFC 6901 pointers relative to their table.
//! Identifiers come straight from the host, so every segment is escaped.

/// Escape one pointer segment (`~` → `~0`, `/` → `~1`)
#[must_use]
pub fn escape(segment: &str) -> String {
    if segment.contains(&['~', '/'][..]) {
        segment.replace('~', "~0").replace('/', "~1")
    } else {
        segment.to_string()
    }
}

/// Build a pointer from displayable segments.
///
/// ```rust
/// use softcore_dataset::ptr;
///
/// let id = "5449016a4bdc2d6f028b456f";
/// assert_eq!(ptr!(id, "_props", "Grids", 0), "/5449016a4bdc2d6f028b456f/_props/Grids/0");
/// assert_eq!(ptr!(), "");
/// ```
#[macro_export]
macro_rules! ptr {
    ($($segment:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut pointer = ::std::string::String::new();
        $(
            pointer.push('/');
            pointer.push_str(&$crate::pointer::escape(&$segment.to_string()));
        )*
        pointer
    }};
}

/// Join a base pointer and a relative one
#[must_use]
pub fn join(base: &str, rest: &str) -> String {
    let mut out = String::with_capacity(base.len() + rest.len());
    out.push_str(base);
    out.push_str(rest);
    out
}
