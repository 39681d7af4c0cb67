use tessella_scales::natural_breaks::NaturalBreaksScale;
use tessella_scales::sample::Sample;

fn main() {
    println!("=== Choropleth Coloring Example ===\n");

    // Per-city tax rates as ingestion would hand them over, with gaps
    let cities = vec![
        ("Aurora", 18.4),
        ("Birchfield", 12.1),
        ("Calder", f64::NAN),
        ("Dunmore", 22.7),
        ("Eastvale", 9.3),
        ("Fennwick", 14.8),
        ("Grover", 19.2),
        ("Halloran", 11.0),
        ("Ironbridge", 25.6),
        ("Juniper", 16.3),
    ];

    let rates: Vec<f64> = cities.iter().map(|(_, rate)| *rate).collect();
    let sample = Sample::from_raw(&rates);

    let scale = NaturalBreaksScale::ramped(sample, 4);
    println!("Class boundaries: {:?}\n", scale.breaks().as_slice());

    // Color the whole column in one call, the way a renderer would per frame
    let colors = scale.scale(&rates).as_vec(rates.len());
    println!("City fill colors:");
    for ((name, rate), color) in cities.iter().zip(colors.iter()) {
        if rate.is_finite() {
            println!("  {:<11} {:>5.1}% → {}", name, rate, color);
        } else {
            println!("  {:<11}   n/a → {} (no data)", name, color);
        }
    }

    println!("\nLegend:");
    for entry in scale.legend_entries() {
        println!("  {} {:>5.1}% – {:.1}%", entry.swatch, entry.lower, entry.upper);
    }
}
