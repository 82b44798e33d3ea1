//! Built-in Goa trip dataset shipped with the binary

use super::itinerary::{Itinerary, ItineraryPlan};
use super::types::{BadgeColor, EventType, FlightOption, HotelOption, PlanEvent};

fn flight(
    id: &str,
    airline: &str,
    time: &str,
    price: &str,
    tag: &str,
    scarcity: Option<&str>,
) -> FlightOption {
    FlightOption {
        id: id.to_string(),
        airline: airline.to_string(),
        path: "DEL → GOI".to_string(),
        time: time.to_string(),
        price: price.to_string(),
        tag: tag.to_string(),
        scarcity_msg: scarcity.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn hotel(
    id: &str,
    name: &str,
    location: &str,
    rating: &str,
    price: &str,
    image: &str,
    tag: &str,
    scarcity: Option<&str>,
) -> HotelOption {
    HotelOption {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        rating: rating.to_string(),
        price: price.to_string(),
        image: image.to_string(),
        tag: tag.to_string(),
        scarcity_msg: scarcity.map(str::to_string),
    }
}

pub(super) fn flights() -> Vec<FlightOption> {
    vec![
        flight(
            "opt1",
            "Indigo 6E-23",
            "10:00 AM - 12:30 PM",
            "₹5,400",
            "Recommended",
            Some("Only 3 seats left at this price"),
        ),
        flight(
            "opt2",
            "Vistara UK-88",
            "11:15 AM - 01:45 PM",
            "₹7,200",
            "Premium Economy",
            Some("Filling fast"),
        ),
        flight(
            "opt3",
            "SpiceJet SG-102",
            "06:00 AM - 08:30 AM",
            "₹4,900",
            "Cheapest",
            None,
        ),
    ]
}

pub(super) fn hotels() -> Vec<HotelOption> {
    vec![
        hotel(
            "h1",
            "The St. Regis Goa",
            "Mobor Beach",
            "5.0",
            "₹22,500",
            "bg-purple-900",
            "Luxury Match",
            Some("Last room available"),
        ),
        hotel(
            "h2",
            "Alila Diwa",
            "Majorda",
            "4.8",
            "₹18,500",
            "bg-orbit-800",
            "Vibe Match",
            Some("High demand dates"),
        ),
        hotel(
            "h3",
            "W Goa",
            "Vagator",
            "4.9",
            "₹25,000",
            "bg-indigo-900",
            "Trending",
            None,
        ),
    ]
}

fn baseline() -> Itinerary {
    use EventType::*;

    Itinerary::new()
        .with_day(
            1,
            vec![
                PlanEvent::new("1-1", Flight, "IndiGo 6E-554", "DEL → GOI", "10:00 AM")
                    .with_duration("2h 15m")
                    .with_badge("On Time", BadgeColor::Green)
                    .with_price("₹5,400")
                    .at(80.0, 15.0),
                PlanEvent::new("1-2", Transfer, "Private Cab", "Airport Pickup", "12:30 PM")
                    .with_duration("45m")
                    .with_price("₹1,200")
                    .at(50.0, 30.0),
                PlanEvent::new("1-3", Hotel, "The St. Regis Goa", "Check-in & Relax", "01:15 PM")
                    .with_badge("Confirmed", BadgeColor::Purple)
                    .with_reasoning("Selected for its beach access and spa facilities.")
                    .with_price("₹22,500/night")
                    .at(25.0, 40.0),
                PlanEvent::new("1-4", Activity, "Sunset Beach Walk", "Mobor Beach", "05:30 PM")
                    .with_badge("Relaxing", BadgeColor::Blue)
                    .at(20.0, 45.0),
                PlanEvent::new("1-5", Activity, "Beachside Dinner", "Fisherman’s Wharf", "08:00 PM")
                    .with_badge("Seafood", BadgeColor::Orange)
                    .at(25.0, 55.0),
            ],
        )
        .with_day(
            2,
            vec![
                PlanEvent::new("2-1", Activity, "Old Goa Churches", "Heritage Walk", "09:00 AM")
                    .with_badge("Culture", BadgeColor::Blue)
                    .at(60.0, 40.0),
                PlanEvent::new(
                    "2-2",
                    Activity,
                    "Local Lunch",
                    "Vinayak Family Restaurant",
                    "01:00 PM",
                )
                .with_badge("Local", BadgeColor::Orange)
                .at(65.0, 50.0),
                PlanEvent::new("2-3", Activity, "Latin Quarter Walk", "Fontainhas", "04:00 PM")
                    .with_badge("Photo Op", BadgeColor::Purple)
                    .at(70.0, 60.0),
            ],
        )
        .with_day(
            3,
            vec![
                PlanEvent::new("3-1", Activity, "Dudhsagar Waterfalls", "Jungle Trek", "07:00 AM")
                    .at(90.0, 80.0),
                PlanEvent::new("3-2", Activity, "Spice Plantation", "Tour & Lunch", "02:00 PM")
                    .at(80.0, 70.0),
            ],
        )
        .with_day(
            4,
            vec![
                PlanEvent::new("4-1", Activity, "Panjim Market", "Souvenir Shopping", "10:00 AM")
                    .at(65.0, 20.0),
                PlanEvent::new("4-2", Flight, "IndiGo 6E-559", "GOI → DEL", "04:00 PM")
                    .at(80.0, 15.0),
            ],
        )
}

/// Day 1 after switching to the later Vistara flight
fn alternate_overrides() -> Itinerary {
    use EventType::*;

    Itinerary::new().with_day(
        1,
        vec![
            PlanEvent::new("1-1-alt", Flight, "Vistara UK-88", "DEL → GOI", "11:15 AM")
                .with_duration("2h 30m")
                .with_badge("Premium Economy", BadgeColor::Purple)
                .with_price("₹7,200")
                .at(80.0, 15.0),
            PlanEvent::new("1-2-alt", Transfer, "Private Taxi", "Late Airport Pickup", "02:00 PM")
                .with_duration("45m")
                .with_price("₹1,500")
                .at(60.0, 25.0)
                .with_reasoning("Traffic Expected due to later arrival time."),
            PlanEvent::new("1-3", Hotel, "The St. Regis Goa", "Check-in & Relax", "03:15 PM")
                .with_badge("Confirmed", BadgeColor::Purple)
                .with_reasoning("Room upgrade requested based on your loyalty status.")
                .with_price("₹22,500/night")
                .at(25.0, 40.0),
            PlanEvent::new("1-4", Activity, "Sunset Beach Walk", "Mobor Beach", "06:00 PM")
                .with_badge("Relaxing", BadgeColor::Blue)
                .at(20.0, 45.0),
        ],
    )
}

pub(super) fn itinerary() -> ItineraryPlan {
    ItineraryPlan::new(baseline(), alternate_overrides())
}
