//! Place category to musical descriptor table.
//!
//! Keys are place types as reported by the places provider.

use std::collections::HashMap;
use std::sync::LazyLock;

static CATEGORY_DESCRIPTORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        // Food and drink
        ("cafe", "coffeehouse acoustic"),
        ("coffee_shop", "coffeehouse acoustic"),
        ("bakery", "warm morning bakery folk"),
        ("bar", "smoky bar blues"),
        ("wine_bar", "smooth wine bar jazz"),
        ("pub", "pub folk sing-along"),
        ("night_club", "club house beats"),
        ("restaurant", "dinner jazz"),
        ("fine_dining_restaurant", "elegant string quartet"),
        ("fast_food_restaurant", "bubbly pop"),
        ("hamburger_restaurant", "retro diner rock and roll"),
        ("pizza_restaurant", "italian mandolin pop"),
        ("italian_restaurant", "italian mandolin serenade"),
        ("french_restaurant", "parisian cafe accordion"),
        ("spanish_restaurant", "flamenco guitar"),
        ("mexican_restaurant", "mariachi trumpets"),
        ("brazilian_restaurant", "bossa nova"),
        ("greek_restaurant", "bouzouki folk"),
        ("turkish_restaurant", "anatolian saz grooves"),
        ("lebanese_restaurant", "oud melodies"),
        ("middle_eastern_restaurant", "middle eastern oud and darbuka"),
        ("mediterranean_restaurant", "mediterranean acoustic"),
        ("indian_restaurant", "sitar and tabla"),
        ("thai_restaurant", "thai pin melodies"),
        ("vietnamese_restaurant", "vietnamese dan bau"),
        ("chinese_restaurant", "guzheng melodies"),
        ("japanese_restaurant", "koto and shakuhachi"),
        ("sushi_restaurant", "city pop"),
        ("ramen_restaurant", "tokyo lo-fi"),
        ("korean_restaurant", "k-pop inspired synths"),
        ("indonesian_restaurant", "gamelan textures"),
        ("american_restaurant", "americana roots"),
        ("barbecue_restaurant", "southern blues rock"),
        ("steak_house", "classic crooner swing"),
        ("seafood_restaurant", "coastal surf guitar"),
        ("breakfast_restaurant", "sunny morning folk"),
        ("brunch_restaurant", "breezy brunch soul"),
        ("sandwich_shop", "indie pop"),
        ("vegan_restaurant", "organic world fusion"),
        ("vegetarian_restaurant", "earthy acoustic"),
        ("ice_cream_shop", "sweet bubblegum pop"),
        ("dessert_shop", "playful pizzicato"),
        ("tea_house", "zen tea ceremony flute"),
        ("juice_shop", "fresh tropical house"),
        ("food_court", "bustling upbeat pop"),
        ("meal_takeaway", "urban hip hop"),
        ("brewery", "rowdy folk rock"),
        ("winery", "vineyard acoustic guitar"),
        // Culture and entertainment
        ("art_gallery", "abstract experimental"),
        ("museum", "contemplative neoclassical"),
        ("performing_arts_theater", "dramatic orchestral"),
        ("opera_house", "operatic arias"),
        ("concert_hall", "symphonic orchestra"),
        ("philharmonic_hall", "symphonic orchestra"),
        ("library", "quiet study piano"),
        ("book_store", "literary piano"),
        ("movie_theater", "cinematic score"),
        ("amusement_park", "carnival organ"),
        ("amusement_center", "arcade chiptune"),
        ("video_arcade", "8-bit chiptune"),
        ("bowling_alley", "retro funk"),
        ("casino", "vegas lounge swing"),
        ("karaoke", "pop ballad singalong"),
        ("comedy_club", "quirky jazz"),
        ("dance_hall", "disco grooves"),
        ("event_venue", "festival anthems"),
        ("wedding_venue", "romantic strings"),
        ("banquet_hall", "big band swing"),
        ("cultural_center", "world music fusion"),
        ("community_center", "community gospel"),
        ("convention_center", "corporate synth pop"),
        ("historical_landmark", "epic historical orchestral"),
        ("monument", "heroic brass"),
        ("tourist_attraction", "adventurous world beat"),
        ("visitor_center", "uplifting acoustic"),
        ("aquarium", "underwater ambient"),
        ("zoo", "playful jungle percussion"),
        ("planetarium", "cosmic synth ambient"),
        ("observation_deck", "soaring skyline synths"),
        ("castle", "medieval lute"),
        ("ferris_wheel", "whimsical waltz"),
        // Outdoors
        ("park", "open air acoustic"),
        ("city_park", "open air acoustic"),
        ("national_park", "majestic nature soundscape"),
        ("state_park", "folk trail songs"),
        ("dog_park", "playful bouncy ukulele"),
        ("botanical_garden", "lush organic textures"),
        ("garden", "peaceful garden harp"),
        ("hiking_area", "adventurous folk"),
        ("campground", "campfire guitar"),
        ("beach", "beach surf rock"),
        ("marina", "yacht rock"),
        ("lake", "still water piano"),
        ("river", "flowing water guitar"),
        ("mountain_peak", "soaring epic orchestral"),
        ("ski_resort", "crisp alpine electronica"),
        ("plaza", "street busker jazz"),
        ("fountain", "sparkling harp arpeggios"),
        ("picnic_ground", "sunny picnic folk"),
        ("playground", "joyful xylophone"),
        // Sports and fitness
        ("stadium", "stadium rock anthem"),
        ("arena", "arena rock anthem"),
        ("sports_complex", "pump-up hip hop"),
        ("sports_club", "motivational rock"),
        ("athletic_field", "marching drumline"),
        ("gym", "workout edm"),
        ("fitness_center", "workout edm"),
        ("yoga_studio", "meditative yoga flow"),
        ("swimming_pool", "poolside house"),
        ("golf_course", "smooth country club jazz"),
        ("tennis_court", "bright indie rock"),
        ("skateboard_park", "skate punk"),
        ("cycling_park", "kinetic electro"),
        ("race_course", "high octane rock"),
        // Lodging
        ("hotel", "lobby lounge jazz"),
        ("resort_hotel", "tropical lounge"),
        ("motel", "roadside americana"),
        ("hostel", "backpacker indie folk"),
        ("bed_and_breakfast", "homely acoustic"),
        ("guest_house", "homely acoustic"),
        ("inn", "rustic folk"),
        ("cottage", "pastoral folk"),
        ("rv_park", "road trip country"),
        // Shopping
        ("shopping_mall", "upbeat retail pop"),
        ("department_store", "shopping pop"),
        ("clothing_store", "fashion runway house"),
        ("shoe_store", "funky strut"),
        ("jewelry_store", "glittering harp"),
        ("electronics_store", "glitchy electronica"),
        ("record_store", "crate digging soul"),
        ("music_store", "guitar shop blues jam"),
        ("market", "bustling market percussion"),
        ("farmers_market", "bluegrass fiddle"),
        ("flea_market", "vintage vinyl crackle"),
        ("supermarket", "easy listening"),
        ("grocery_store", "easy listening"),
        ("convenience_store", "late night city pop"),
        ("florist", "delicate spring strings"),
        ("gift_shop", "music box melodies"),
        ("furniture_store", "mid-century lounge"),
        ("home_goods_store", "cozy home acoustic"),
        ("pet_store", "playful bouncy pop"),
        ("toy_store", "whimsical toy piano"),
        ("liquor_store", "late night blues"),
        ("sporting_goods_store", "energetic rock"),
        // Transport
        ("airport", "jet-set chillout"),
        ("train_station", "rhythmic train journey"),
        ("subway_station", "underground breakbeat"),
        ("bus_station", "urban commute beats"),
        ("transit_station", "urban commute beats"),
        ("light_rail_station", "gliding synth pop"),
        ("ferry_terminal", "sea shanty"),
        ("gas_station", "highway rock"),
        ("parking", "city ambient"),
        ("rest_stop", "road trip country"),
        // Services, education, worship
        ("university", "academic chamber music"),
        ("school", "bright youthful pop"),
        ("church", "choral hymns"),
        ("hindu_temple", "devotional bhajan"),
        ("mosque", "meditative nasheed"),
        ("synagogue", "klezmer clarinet"),
        ("buddhist_temple", "temple bells and chant"),
        ("place_of_worship", "sacred choral"),
        ("cemetery", "solemn requiem"),
        ("hospital", "calm healing tones"),
        ("spa", "spa relaxation"),
        ("beauty_salon", "glossy pop"),
        ("barber_shop", "old school hip hop"),
        ("hair_salon", "glossy pop"),
        ("tattoo_shop", "gritty punk"),
        ("laundry", "lazy sunday funk"),
        ("city_hall", "stately brass"),
        ("courthouse", "tense orchestral"),
        ("embassy", "diplomatic chamber strings"),
        ("police", "tense urban pulse"),
        ("fire_station", "heroic brass"),
        ("post_office", "everyday indie"),
        ("bank", "corporate minimal"),
        ("coworking_space", "focus lo-fi"),
        ("corporate_office", "productive electronica"),
    ]
    .into_iter()
    .collect()
});

/// Descriptor for a place type, if the table knows it.
pub fn category_descriptor(place_type: &str) -> Option<&'static str> {
    CATEGORY_DESCRIPTORS.get(place_type).copied()
}

/// Number of known categories.
#[cfg(test)]
pub(crate) fn category_count() -> usize {
    CATEGORY_DESCRIPTORS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown() {
        assert_eq!(category_descriptor("cafe"), Some("coffeehouse acoustic"));
        assert_eq!(category_descriptor("stadium"), Some("stadium rock anthem"));
        assert_eq!(category_descriptor("spaceport"), None);
    }

    #[test]
    fn table_is_large() {
        assert!(category_count() >= 150);
    }
}
