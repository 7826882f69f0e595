#[derive(Debug, Clone)]
pub struct Movie {
    pub id: u32,
    pub title: &'static str,
    pub year: &'static str,
    pub note: &'static str,
    pub image: &'static str,
}

const fn movie(id: u32, title: &'static str, year: &'static str, note: &'static str, image: &'static str) -> Movie {
    Movie { id, title, year, note, image }
}

pub const MOVIES: &[Movie] = &[
    movie(1, "Stand by Me", "1986", "Friendship and memory.", "/images/byme.jpg"),
    movie(2, "The Good, the Bad and the Ugly", "1966", "Classic western rhythm.", "/images/thegood.jpg"),
    movie(3, "Aparan", "1988", "A Padmarajan film.", "/images/aparan.jpg"),
    movie(4, "Taxi Driver", "1976", "Isolation & Rage", "/images/taxi.jpg"),
    movie(5, "Into the Wild", "2007", "Freedom & Solitude", "/images/into.jpg"),
    movie(6, "Cape Fear", "1991", "Revenge & Fear", "/images/cape.jpg"),
    movie(7, "The Breakfast Club", "1985", "Identity & Connection", "/images/break.jpg"),
    movie(8, "Heat", "1995", "Obsession & Duty", "/images/heat.jpg"),
    movie(9, "Dead Poets Society", "1989", "Inspiration & Rebellion", "/images/dead.jpg"),
    movie(10, "Back to the Future Trilogy", "1985-1990", "Adventure & Time", "/images/bttf.jpg"),
    movie(11, "The Goat Life", "2024", "Survival & Faith", "/images/goat.jpg"),
    movie(12, "The Godfather Part II", "1974", "Legacy & Corruption", "/images/god2.jpg"),
    movie(13, "Hud", "1963", "Moral Decay & Loneliness", "/images/hud.jpg"),
    movie(14, "The Hateful Eight", "2015", "Deception & Survival", "/images/8.jpg"),
    movie(15, "Rambo: First Blood", "1982", "Isolation & Survival", "/images/first.jpeg"),
];
