//! Conventional inline event-handler names
//!
//! Handler sync is opt-in. Pass this list (or a subset) to
//! [`crate::MorphOptions::with_events`] to copy and clear these handlers while
//! patching.

/// Inline event-handler names found on ordinary HTML elements
pub const DEFAULT_EVENTS: &[&str] = &[
    // mouse
    "onclick",
    "ondblclick",
    "onmousedown",
    "onmouseup",
    "onmouseover",
    "onmousemove",
    "onmouseout",
    "onmouseenter",
    "onmouseleave",
    // touch
    "ontouchcancel",
    "ontouchend",
    "ontouchmove",
    "ontouchstart",
    // drag
    "ondragstart",
    "ondrag",
    "ondragenter",
    "ondragleave",
    "ondragover",
    "ondrop",
    "ondragend",
    // keyboard
    "onkeydown",
    "onkeypress",
    "onkeyup",
    // window-ish
    "onunload",
    "onabort",
    "onerror",
    "onresize",
    "onscroll",
    // form
    "onselect",
    "onchange",
    "onsubmit",
    "onreset",
    "onfocus",
    "onblur",
    "oninput",
    // other
    "oncontextmenu",
];
