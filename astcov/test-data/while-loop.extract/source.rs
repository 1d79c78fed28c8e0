fn main() {
    let x = 1;
    while x < 0 || x > 9 {}
    match x {
        1 => {}
        _ => {}
    }
}

impl Unit {
    fn method(&self) {}
}
