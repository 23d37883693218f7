use rand::seq::SliceRandom;
use rand::Rng;

pub const CAT_NAMES: &[&str] = &[
    "Abby", "Alfie", "Angel", "Bella", "Biscuit", "Boots", "Buttons", "Cleo", "Coco", "Daisy",
    "Dusty", "Felix", "Fluffy", "Garfield", "Ginger", "Gizmo", "Jasper", "Kiki", "Kitty", "Leo",
    "Lily", "Loki", "Lucy", "Luna", "Max", "Milo", "Mittens", "Misty", "Mochi", "Molly", "Nala",
    "Oliver", "Oreo", "Oscar", "Pepper", "Phoebe", "Pumpkin", "Salem", "Sam", "Sasha", "Shadow",
    "Simba", "Smokey", "Socks", "Sophie", "Tiger", "Tigger", "Toby", "Tom", "Whiskers", "Willow",
    "Ziggy",
];

pub fn pick_random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    CAT_NAMES.choose(rng).copied().unwrap_or("Kitty").to_string()
}
