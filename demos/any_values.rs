use sovran_values::{AnyValue, BadAnyCast};

// Example trait: Number
trait Number {
    fn get_value(&self) -> i64;
    fn set_value(&mut self, value: i64);
}

#[derive(Clone)]
struct IntegerValue {
    value: i64,
}

impl Number for IntegerValue {
    fn get_value(&self) -> i64 {
        self.value
    }
    fn set_value(&mut self, value: i64) {
        self.value = value;
    }
}

#[derive(Clone)]
struct DoubledValue {
    value: i64,
}

impl Number for DoubledValue {
    fn get_value(&self) -> i64 {
        self.value * 2
    }
    fn set_value(&mut self, value: i64) {
        self.value = value / 2;
    }
}

fn main() -> Result<(), BadAnyCast> {
    // Hold numbers of different types behind one container type
    let mut num1 = AnyValue::from_value(IntegerValue { value: 42 });
    let num2 = AnyValue::from_value(DoubledValue { value: 21 }); // Will appear as 42 when read

    // Read back by exact type, with explicit error handling
    match num1.cast_ref::<IntegerValue>() {
        Ok(num) => println!("Value 1: {}", num.get_value()),
        Err(e) => println!("Error reading IntegerValue: {}", e),
    }

    // Alternative pattern using ? operator for early return
    println!("Value 2: {}", num2.cast_ref::<DoubledValue>()?.get_value());

    // Update in place
    num1.cast_mut::<IntegerValue>()?.set_value(100);
    println!("New value 1: {}", num1.cast_ref::<IntegerValue>()?.get_value());

    // Copies are independent of the original
    let snapshot = num1.clone();
    num1.cast_mut::<IntegerValue>()?.set_value(7);
    println!(
        "Snapshot still reads {}, original now reads {}",
        snapshot.cast_ref::<IntegerValue>()?.get_value(),
        num1.cast_ref::<IntegerValue>()?.get_value()
    );

    // The wrong type is refused, never converted
    match num2.cast_ref::<IntegerValue>() {
        Ok(_) => println!("This shouldn't happen - num2 holds a DoubledValue"),
        Err(e) => println!("Correctly refused: {}", e),
    }

    // Reset and inspect
    num1.reset();
    println!("num1 has value: {} ({})", num1.has_value(), num1.value_type());

    Ok(())
}
