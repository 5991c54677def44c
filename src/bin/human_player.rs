use std::io::{self, Write}; // For input/output
use taquin_solver::engine::{Board, Position};

const BOARD_SIZE: usize = 3;
const SHUFFLE_DEPTH: usize = 25;

fn main() {
    let mut board = Board::new_shuffled_by_depth(BOARD_SIZE, SHUFFLE_DEPTH);
    let mut steps = 0u32;
    println!("Welcome to the taquin!");

    loop {
        println!("---------------------");
        println!("Steps: {}", steps);
        // Highlight the blank so the player can see where tiles may slide.
        println!("{}", board.to_string_with_highlight(Some(board.empty_position())));

        if board.is_goal() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Steps: {}", steps);
            println!("---------------------");
            break;
        }

        print!("Enter the tile to slide (column row), or 'q' to quit: ");
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        // Try to parse as coordinates
        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() == 2 {
            if let (Ok(x), Ok(y)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) {
                if x < BOARD_SIZE && y < BOARD_SIZE {
                    if board.apply_user_move(Position::new(x, y)) {
                        steps += 1;
                        println!("Move processed.");
                    } else {
                        println!(
                            "Invalid move: The tile at ({}, {}) is not next to the blank.",
                            x, y
                        );
                    }
                } else {
                    println!(
                        "Invalid coordinates: Column and row must be between 0 and {}.",
                        BOARD_SIZE - 1
                    );
                }
            } else {
                println!("Invalid input: Please enter numbers for column and row (e.g., '2 1'), or 'q'.");
            }
        } else {
            println!("Invalid input format. Use 'column row' or 'q'.");
        }
    }
}
