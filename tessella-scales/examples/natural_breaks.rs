use tessella_scales::natural_breaks::natural_breaks;
use tessella_scales::sample::Sample;

fn main() {
    println!("=== Natural Breaks Classification Examples ===\n");

    // Example 1: the canonical equal-groups case
    println!("1. Evenly spaced values:");
    let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    println!("Values: {:?}", values);

    let sample = Sample::from_raw(&values);
    let breaks = natural_breaks(&sample, 3);
    println!("Breaks for 3 classes: {:?}", breaks.as_slice());

    for &v in &values {
        println!("  {:>4} → class {:?}", v, breaks.class_of(v));
    }

    // Example 2: clustered data splits at the gaps, not at even intervals
    println!("\n2. Clustered values:");
    let values = vec![2.1, 2.3, 2.2, 8.4, 8.6, 8.5, 8.7, 30.0, 31.5, 30.8];
    println!("Values: {:?}", values);

    let sample = Sample::from_raw(&values);
    let breaks = natural_breaks(&sample, 3);
    println!("Breaks for 3 classes: {:?}", breaks.as_slice());
    for class in 0..breaks.class_count() {
        let (lower, upper) = breaks.class_span(class).unwrap();
        println!("  class {}: [{}, {})", class, lower, upper);
    }

    // Example 3: missing cells and low cardinality
    println!("\n3. Degenerate inputs:");
    let values = vec![4.0, f64::NAN, 4.0, 7.0, f64::NAN];
    let sample = Sample::from_raw(&values);
    println!(
        "Raw {:?} prepares to {:?} ({} unique)",
        values,
        sample.values(),
        sample.unique_count()
    );

    let breaks = natural_breaks(&sample, 5);
    println!(
        "Breaks for 5 requested classes: {:?} (unique values, no partitioning needed)",
        breaks.as_slice()
    );
}
