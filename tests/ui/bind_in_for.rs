//! Error: `bind!` inside a `for` loop body

use donotation::do_notation;

#[do_notation]
fn first_even(xs: Vec<u32>) -> Option<u32> {
    for x in xs {
        let y = bind!(Some(x));
    }
    None
}

fn main() {}
