//! Error: `bind!` under an `if` inside a `while` loop

use donotation::do_notation;

#[do_notation]
fn drain(mut n: u32) -> Option<u32> {
    while n > 0 {
        if n % 2 == 0 { bind!(Some(n)); }
        n -= 1;
    }
    Some(n)
}

fn main() {}
