//! Place components from the starter library and query them back.

use protoboard::prelude::*;

fn main() {
    let library = ComponentLibrary::with_defaults();
    let mut board = Board::new(30, 20);

    let dip8 = library.get("DIP8").expect("starter library has a DIP8");
    let placed = PlacedComponent::new(dip8, 5, 5, "u1", Rotation::R90);
    println!(
        "placing DIP8 at (5, 5) rotated 90: effective box {}x{}",
        placed.width(),
        placed.height()
    );
    assert!(board.add_component(placed));

    // Walk the rotated bounding box and show what each cell answers.
    for y in 5..8 {
        for x in 5..9 {
            let pin = board.pin_at(x, y).map(|(_, label)| label);
            let body = board.component_at(x, y).is_some();
            println!(
                "({x:2}, {y:2})  body: {body:5}  pin: {}",
                pin.unwrap_or("-")
            );
        }
    }

    // Out-of-bounds placements are rejected, boundary-inclusive.
    let resistor = library.get("Resistor").expect("starter library has a resistor");
    let flush = PlacedComponent::new(resistor.clone(), 27, 0, "r1", Rotation::R0);
    let over = PlacedComponent::new(resistor, 28, 0, "r2", Rotation::R0);
    println!("flush placement accepted: {}", board.add_component(flush));
    println!("overhanging placement accepted: {}", board.add_component(over));
}
