//! Error: `bind!` nested inside an expression

use donotation::do_notation;

#[do_notation]
fn plus_one(m: Option<u32>) -> Option<u32> {
    let total = bind!(m) + 1;
    Some(total)
}

fn main() {}
