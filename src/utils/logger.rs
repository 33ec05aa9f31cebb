// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// logger.rs
//
// The rendering step the core's typed event log hands off to (Design
// Note 9, "Observable log"): the core never formats a string itself, it
// only appends `LogEvent`s. `EventRenderer` turns those into text and
// writes them to a file or stdout, the way the original `Logger` wrote
// pre-formatted messages.

use std::fs::File;
use std::io::{self, Write};

use crate::errors::CoreError;
use crate::tomasulo::log::LogEvent;

pub struct EventRenderer {
    file: Option<File>,
}

impl EventRenderer {
    pub fn to_stdout() -> Self {
        Self { file: None }
    }

    pub fn to_file(path: &str) -> Result<Self, CoreError> {
        Ok(Self { file: Some(File::create(path)?) })
    }

    pub fn render(&mut self, events: &[LogEvent]) -> io::Result<()> {
        for event in events {
            let line = format!("{}\n", event);
            match &mut self.file {
                Some(file) => file.write_all(line.as_bytes())?,
                None => print!("{}", line),
            }
        }
        Ok(())
    }
}
