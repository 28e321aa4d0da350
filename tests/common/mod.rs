#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::{Lox, Status};

/// An in-memory sink that can be handed to the interpreter while the test
/// keeps a handle to read it back.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session wired to in-memory stdout/stderr.
pub struct Session {
    pub lox: Lox,
    pub out: SharedBuf,
    pub err: SharedBuf,
}

impl Session {
    pub fn new() -> Self {
        let out = SharedBuf::default();
        let err = SharedBuf::default();
        let lox = Lox::with_output(Box::new(out.clone()), Box::new(err.clone()));

        Self { lox, out, err }
    }

    pub fn run(&mut self, source: &str) -> Status {
        self.lox.run(source)
    }
}

/// Run `source` in a fresh session: (status, stdout, stderr).
pub fn run(source: &str) -> (Status, String, String) {
    let mut session = Session::new();
    let status = session.run(source);

    (status, session.out.contents(), session.err.contents())
}

/// Run a program expected to succeed and return its printed lines.
pub fn output_lines(source: &str) -> Vec<String> {
    let (status, out, err) = run(source);
    assert_eq!(status, Status::Ok, "program failed:\n{}", err);

    out.lines().map(str::to_owned).collect()
}
