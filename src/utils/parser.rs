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

// parser.rs
//
// Parses MIPS-like assembly text into the ordered `Instruction` list the
// Tomasulo core steps through (spec §4.1). Unknown opcodes and malformed
// lines are dropped silently; the parser never aborts on bad input.

use crate::tomasulo::instruction::{Instruction, Opcode, Stage};

pub fn parse_program(text: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut id_counter: u32 = 1;

    for raw_line in text.lines() {
        let without_comment = match raw_line.find('#') {
            Some(idx) => &raw_line[..idx],
            None => raw_line,
        };
        let line = without_comment.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line, id_counter, instructions.len()) {
            Some(instruction) => {
                id_counter += 1;
                instructions.push(instruction);
            },
            None => log::debug!("parser: dropping unparseable line `{}`", line),
        }
    }

    instructions
}

fn parse_line(line: &str, id: u32, pc_addr: usize) -> Option<Instruction> {
    let mut split = line.splitn(2, char::is_whitespace);
    let opcode_str = split.next()?;
    let rest = split.next().unwrap_or("").trim();
    let opcode = Opcode::from_mnemonic(opcode_str)?;

    let (dest, src1, src2, immediate) = if opcode.is_memory_form() {
        parse_memory_operands(opcode, rest)?
    } else {
        parse_register_operands(opcode, rest)?
    };

    Some(Instruction {
        id,
        opcode,
        dest,
        src1,
        src2,
        immediate,
        pc_addr,
        raw_text: line.to_string(),
        stage: Stage::Issue,
    })
}

/// `OP <reg>, <imm>(<reg>)`, LW/LD/SW/SD (spec §4.1).
fn parse_memory_operands(
    opcode: Opcode,
    rest: &str,
) -> Option<(Option<String>, Option<String>, Option<String>, i64)> {
    let (arg1, tail) = rest.split_once(',')?;
    let arg1 = arg1.trim().to_string();
    let tail = tail.trim();

    let open = tail.find('(')?;
    let close = tail.find(')')?;
    if close < open {
        return None;
    }
    let offset_str = tail[..open].trim();
    let base = tail[open + 1..close].trim().to_string();
    let offset: i64 = offset_str.parse().ok()?;

    Some(if opcode.is_store() {
        (None, Some(arg1), Some(base), offset)
    } else {
        (Some(arg1), None, Some(base), offset)
    })
}

/// `OP <dest>, <src1>, <src2>` or, for BEQ/BNE, `OP <reg_a>, <reg_b>, <imm>`.
fn parse_register_operands(
    opcode: Opcode,
    rest: &str,
) -> Option<(Option<String>, Option<String>, Option<String>, i64)> {
    let tokens: Vec<&str> = rest.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()).collect();

    if opcode.is_branch() {
        if tokens.len() < 3 {
            return None;
        }
        // immediate is lifted from src2 at Issue time (§4.5), not here.
        return Some((Some(tokens[0].to_string()), Some(tokens[1].to_string()), Some(tokens[2].to_string()), 0));
    }

    let dest = tokens.first().map(|s| s.to_string());
    let src1 = tokens.get(1).map(|s| s.to_string());
    let src2 = tokens.get(2).map(|s| s.to_string());
    Some((dest, src1, src2, 0))
}
