pub const PRINT_BUILTIN: &str = "print";
pub const JS_PRINT: &str = "console.log";
pub const JS_NIL: &str = "undefined";

pub const MEMO_HELPER_NAME: &str = "lazy_hlp";

pub const JS_MEMO_HELPER: &str = r#"function lazy_hlp(exp_closure) {
  var evaled = false, v;
  return () => {
    if (!evaled) {
      v = exp_closure();
      evaled = true;
    }
    return v;
  }
}
"#;

pub const CELL_HELPER_NAME: &str = "make_val";

pub const JS_CELL_HELPER: &str = r#"function make_val(c) {
  var o = {
    "snap": () => make_val(c),
    "set": (closure) => {
      var evaled = false;
      var v;
      c = () => {
        if (!evaled) {
          v = closure();
          evaled = true;
        }
        return v;
      }
      return o;
    },
    "get": () => c()
  };
  return o;
}
"#;

pub fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
