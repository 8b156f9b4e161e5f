pub const PROMPT: &str = "folio> ";

pub const READER_HELP: &str = "\
Commands:
  n | next            turn forward
  p | prev            turn back
  j <page>            jump to page (1-based)
  home | end          first or last page
  swipe <dx>          horizontal swipe by dx pixels (negative turns forward)
  resize <w> <h>      change the viewport size
  open <slug>         open another issue
  help                show this text
  q | quit            leave the reader";

pub const LOAD_FALLBACK: &str = "Failed to load magazine";
pub const LOGIN_HINT: &str = "run `folio admin login` to sign in again";

pub const PREV_ENABLED: &str = "[< Prev]";
pub const PREV_DISABLED: &str = "[  ----]";
pub const NEXT_ENABLED: &str = "[Next >]";
pub const NEXT_DISABLED: &str = "[----  ]";
