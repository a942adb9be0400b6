// Dictionaries for generated token names. Every entry is a single word.

pub const ADJECTIVES: &[&str] = &[
    "able", "absent", "active", "adorable", "agile", "amber", "ancient", "angry", "arctic",
    "bold", "brave", "breezy", "bright", "brisk", "busy", "calm", "careful", "cheerful",
    "chilly", "clever", "cloudy", "cosmic", "crimson", "crisp", "curious", "daring", "dizzy",
    "eager", "early", "electric", "elegant", "emerald", "epic", "faint", "fancy", "fearless",
    "fierce", "flying", "fluffy", "frozen", "funny", "gentle", "giant", "glad", "golden",
    "graceful", "grumpy", "happy", "hidden", "honest", "humble", "hungry", "icy", "jolly",
    "keen", "kind", "lazy", "little", "lively", "lucky", "lunar", "magic", "mellow", "mighty",
    "misty", "modest", "nervous", "nimble", "noble", "odd", "patient", "plain", "polite",
    "proud", "purple", "quick", "quiet", "rapid", "rare", "rusty", "scarlet", "shiny", "shy",
    "silent", "silver", "sleepy", "smooth", "solar", "sparkling", "steady", "stormy", "sunny",
    "swift", "tender", "tidy", "tiny", "tranquil", "vivid", "wandering", "warm", "wild",
    "wise", "witty", "young", "zealous",
];

pub const NAMES: &[&str] = &[
    "Abigail", "Ada", "Adrian", "Aileen", "Alba", "Alice", "Amalea", "Amos", "Anika", "Arlo",
    "Astrid", "Basil", "Beatrix", "Bianca", "Boris", "Bruno", "Calla", "Cedric", "Clara",
    "Cosmo", "Dahlia", "Dante", "Delia", "Dorian", "Edith", "Elio", "Elsa", "Emil", "Esme",
    "Felix", "Fiona", "Flora", "Frida", "Gideon", "Greta", "Gus", "Hazel", "Hector", "Hugo",
    "Ida", "Imogen", "Ines", "Ivo", "Jasper", "Juno", "Kai", "Kira", "Lena", "Leo", "Lila",
    "Linus", "Luna", "Mabel", "Magnus", "Maia", "Milo", "Mira", "Nadia", "Nico", "Nora",
    "Oda", "Olga", "Olive", "Oscar", "Otto", "Pablo", "Paloma", "Pia", "Quentin", "Quinn",
    "Rafael", "Rhea", "Rosa", "Rufus", "Sabine", "Selma", "Silas", "Sonia", "Stella", "Talia",
    "Theo", "Tilda", "Ugo", "Una", "Valentin", "Vera", "Viggo", "Wanda", "Willa", "Xander",
    "Xenia", "Yara", "Yusuf", "Zara", "Zeno", "Zoe",
];
