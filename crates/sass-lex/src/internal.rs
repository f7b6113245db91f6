//! The internal impl.

use crate::error;
use crate::st::St;
use sass_syntax::kind::SyntaxKind as SK;

/// Lexes one token. `nl_is_ws` is false in indented mode, where the caller
/// owns newline handling.
#[expect(clippy::too_many_lines)]
pub(crate) fn token(st: &mut St<'_>, out: &mut error::Output, b: u8, nl_is_ws: bool) -> SK {
  if is_ws(b, nl_is_ws) {
    st.bump();
    st.bump_while(|b| is_ws(b, nl_is_ws));
    return SK::Whitespace;
  }
  if b == b'/' {
    match st.peek(1) {
      Some(b'/') => {
        st.bump();
        st.bump();
        st.bump_while(|b| b != b'\n');
        return SK::LineComment;
      }
      Some(b'*') => {
        let loud = st.peek(2) == Some(b'!');
        st.bump();
        st.bump();
        let Some(mut prev) = st.cur() else {
          out.err(st.cur_idx(), error::Kind::UnclosedComment);
          return SK::BlockComment;
        };
        st.bump();
        while let Some(cur) = st.cur() {
          st.bump();
          if prev == b'*' && cur == b'/' {
            return if loud { SK::LoudComment } else { SK::BlockComment };
          }
          prev = cur;
        }
        out.err(st.cur_idx(), error::Kind::UnclosedComment);
        return SK::BlockComment;
      }
      Some(_) | None => {
        st.bump();
        return SK::Slash;
      }
    }
  }
  if b == b'"' || b == b'\'' {
    st.bump();
    loop {
      match st.cur() {
        None | Some(b'\n') => {
          out.err(st.cur_idx(), error::Kind::UnclosedString);
          return SK::String;
        }
        Some(b'\\') => {
          st.bump();
          if st.cur().is_some() {
            st.next_str();
          }
        }
        Some(cur) => {
          if cur == b {
            st.bump();
            return SK::String;
          }
          st.next_str();
        }
      }
    }
  }
  if b == b'#' {
    if st.peek(1) == Some(b'{') {
      st.bump();
      st.bump();
      return SK::HashLCurly;
    }
    if st.peek(1).is_some_and(is_ident_continue) {
      st.bump();
      st.bump_while(is_ident_continue);
      return SK::HashIdent;
    }
    st.bump();
    return SK::Hash;
  }
  if b == b'$' && st.peek(1).is_some_and(is_ident_start) {
    st.bump();
    st.bump();
    st.bump_while(is_ident_continue);
    return SK::Variable;
  }
  if b == b'@' && st.peek(1).is_some_and(is_ident_start) {
    st.bump();
    st.bump();
    st.bump_while(is_ident_continue);
    return SK::AtKeyword;
  }
  if b.is_ascii_digit() || (b == b'.' && st.peek(1).is_some_and(|b| b.is_ascii_digit())) {
    number(st);
    return SK::Number;
  }
  if is_ident_start(b) || (b == b'-' && st.peek(1).is_some_and(|b| is_ident_start(b) || b == b'-'))
  {
    st.bump();
    st.bump_while(is_ident_continue);
    return SK::Ident;
  }
  if let Some(&(_, sk)) = SK::PUNCTUATION.iter().find(|&&(bs, _)| st.eat_prefix(bs)) {
    return sk;
  }
  out.err(st.cur_idx(), error::Kind::InvalidBytes);
  st.next_str();
  SK::Invalid
}

fn number(st: &mut St<'_>) {
  st.bump_while(|b| b.is_ascii_digit());
  if st.cur() == Some(b'.') && st.peek(1).is_some_and(|b| b.is_ascii_digit()) {
    st.bump();
    st.bump_while(|b| b.is_ascii_digit());
  }
}

fn is_ws(b: u8, nl_is_ws: bool) -> bool {
  match b {
    b' ' | b'\t' | b'\r' => true,
    b'\n' => nl_is_ws,
    _ => false,
  }
}

fn is_ident_start(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}
