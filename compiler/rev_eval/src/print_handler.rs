//! Output sink for the `print` builtin.
//!
//! The interpreter never writes to stdout directly; embedders (and
//! tests) pick the sink.

use std::cell::RefCell;
use std::rc::Rc;

/// Where `print` output goes.
#[derive(Clone)]
pub enum PrintHandler {
    Stdout,
    Buffer(Rc<RefCell<String>>),
}

impl PrintHandler {
    pub fn println(&self, line: &str) {
        match self {
            PrintHandler::Stdout => println!("{line}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(line);
                buffer.push('\n');
            }
        }
    }
}

/// A buffering handler plus a handle to read what was printed.
pub fn buffer_handler() -> (PrintHandler, Rc<RefCell<String>>) {
    let buffer = Rc::new(RefCell::new(String::new()));
    (PrintHandler::Buffer(Rc::clone(&buffer)), buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_collects_lines() {
        let (handler, buffer) = buffer_handler();
        handler.println("one");
        handler.println("two");
        assert_eq!(&*buffer.borrow(), "one\ntwo\n");
    }
}
