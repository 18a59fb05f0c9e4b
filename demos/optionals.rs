use sovran_values::{make_optional, BadOptionalAccess, Optional, NULLOPT};

#[derive(Debug, Clone, PartialEq)]
struct Animal {
    name: String,
    sound: &'static str,
}

fn find_pet(name: &str) -> Optional<Animal> {
    match name {
        "Rover" => make_optional(Animal {
            name: name.to_string(),
            sound: "Woof!",
        }),
        "Whiskers" => make_optional(Animal {
            name: name.to_string(),
            sound: "Meow!",
        }),
        _ => Optional::new(),
    }
}

fn main() -> Result<(), BadOptionalAccess> {
    let rover = find_pet("Rover");
    println!("{} says {}", rover.value()?.name, rover.value()?.sound);

    // Missing values are an error only when asked for
    let nobody = find_pet("Nobody");
    match nobody.value() {
        Ok(pet) => println!("Unexpected pet: {:?}", pet),
        Err(e) => println!("Lookup failed: {}", e),
    }
    println!("nobody == NULLOPT: {}", nobody == NULLOPT);

    // Fall back to a default
    let fallback = Animal {
        name: "Stray".to_string(),
        sound: "...",
    };
    println!("Fallback: {:?}", nobody.value_or(fallback));

    // Reuse the same slot
    let mut slot = find_pet("Whiskers");
    slot.emplace(|| Animal {
        name: "Tom".to_string(),
        sound: "Purr",
    });
    println!("Slot now holds {:?}", slot);

    // Swap contents
    let mut other = Optional::new();
    slot.swap(&mut other);
    println!("After swap: slot = {:?}, other = {:?}", slot, other);

    // Disengaged sorts first
    let mut ages = vec![make_optional(7), Optional::new(), make_optional(3)];
    ages.sort();
    println!("Sorted: {:?}", ages);

    Ok(())
}
