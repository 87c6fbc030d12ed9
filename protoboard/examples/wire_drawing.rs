//! Drive the editor session state machine: place a part, then route wires
//! around it on both faces.

use protoboard::prelude::*;

fn main() {
    let mut session = EditorSession::new(Board::new(30, 20), ComponentLibrary::with_defaults());

    session.select_definition("Resistor");
    let uid = match session.click(5, 5) {
        ClickOutcome::Placed { uid } => uid,
        other => panic!("placement failed: {:?}", other),
    };
    println!("placed resistor {uid} at (5, 5)");

    // Front face: the body cell in the middle blocks, the pin cells accept.
    session.set_mode(ToolMode::Wire);
    for point in [(6, 5), (5, 5), (2, 5)] {
        let outcome = session.click(point.0, point.1);
        println!("front click at {point:?}: {outcome:?}");
    }
    if let Some(name) = session.escape() {
        println!("escape committed wire {name}");
    }

    // Back face: routing under the body is allowed.
    session.toggle_view();
    session.click(6, 5);
    session.click(6, 10);
    session.click(6, 10);
    for wire in session.board().wires() {
        println!(
            "wire {} on {:?} via {} points, color {}",
            wire.name,
            wire.side,
            wire.points.len(),
            wire.color
        );
    }
}
