//! Error: `method` and `callback` together

use donotation::do_notation;

#[do_notation(method = and_then, callback = my_bind)]
fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    let x = bind!(a);
    let y = bind!(b);
    Some(x + y)
}

fn main() {}
