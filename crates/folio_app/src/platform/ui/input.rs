//! Reader command line parsing.

use folio_core::{Key, Msg, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum ReaderInput {
    Messages(Vec<Msg>),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> ReaderInput {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return ReaderInput::Messages(Vec::new());
    };
    let args: Vec<&str> = words.collect();

    match (command.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("n" | "next", []) => single(Msg::NextClicked),
        ("p" | "prev", []) => single(Msg::PrevClicked),
        ("home", []) => single(Msg::KeyPressed(Key::Home)),
        ("end", []) => single(Msg::KeyPressed(Key::End)),
        ("j" | "jump", [page]) => match page.parse::<usize>() {
            Ok(page) if page >= 1 => single(Msg::ThumbnailClicked(page - 1)),
            _ => ReaderInput::Invalid(format!("not a page number: {page}")),
        },
        ("swipe", [dx]) => match dx.parse::<f32>() {
            Ok(dx) if dx.is_finite() => ReaderInput::Messages(vec![
                Msg::TouchStarted { x: 0.0 },
                Msg::TouchEnded { x: dx },
            ]),
            _ => ReaderInput::Invalid(format!("not a distance: {dx}")),
        },
        ("resize", [width, height]) => match (width.parse::<f32>(), height.parse::<f32>()) {
            (Ok(width), Ok(height)) if width >= 0.0 && height >= 0.0 => {
                single(Msg::Resized(Viewport::new(width, height)))
            }
            _ => ReaderInput::Invalid(format!("not a size: {width} {height}")),
        },
        ("open", [slug]) => single(Msg::OpenPublication((*slug).to_string())),
        ("help" | "?", []) => ReaderInput::Help,
        ("q" | "quit" | "exit", []) => ReaderInput::Quit,
        _ => ReaderInput::Invalid(format!("unknown command: {}", line.trim())),
    }
}

fn single(msg: Msg) -> ReaderInput {
    ReaderInput::Messages(vec![msg])
}
