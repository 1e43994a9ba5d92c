//! Error: a `let` inside an arm would shadow the name read after the `if`

use donotation::do_notation;

#[do_notation]
fn scaled(m: Option<u32>, flag: bool) -> Option<u32> {
    let v = bind!(m);
    if flag {
        let v = v * 10;
        bind!(Some(v));
    }
    Some(v)
}

fn main() {}
