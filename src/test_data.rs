pub const POST_DATA: &str = "Stand by Me
2024-06-01
/images/byme.jpg
film, friendship, memory

Four boys walk along a railway line.

The summer ends, the friendship stays.
Some lines stay with you.
";

pub const POST_LEADING_BLANKS: &str = "


A Letter

2023-05-05
/images/letter.jpg
letters, memory

Dear past,";

pub const POST_RIDGE: &str = "Into the Ridge
2024-01-01
https://example.com/ridge.jpg
hiking, silence

The trail climbs for hours before the ridge opens up.";

pub const POST_RAIN: &str = "Steel and Rain
2023-05-05

city, night

Neon on wet asphalt.";
