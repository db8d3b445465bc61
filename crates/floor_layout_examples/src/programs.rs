use floor_layout::prelude::{
    AdjacencyStrength, DaylightRequirement, PlacementConstraint, PlacementPriority, RoomRequest,
    RoomRule, TableRules, Zone,
};

pub fn office_rules() -> TableRules {
    use AdjacencyStrength::*;

    TableRules::new()
        .with_room("Reception", Zone::Public, PlacementPriority::NearEntry)
        .with_room("Conference", Zone::SemiPublic, PlacementPriority::NearEntry)
        .with_room("Office", Zone::Private, PlacementPriority::Perimeter)
        .with_room("Open Office", Zone::Private, PlacementPriority::Middle)
        .with_room("Break Room", Zone::SemiPublic, PlacementPriority::Middle)
        .with_room("Restroom", Zone::Service, PlacementPriority::Core)
        .with_room("Storage", Zone::Service, PlacementPriority::Back)
        .with_room("Server", Zone::Service, PlacementPriority::Core)
        .with_room_rule("Office", RoomRule::new(DaylightRequirement::Required))
        .with_room_rule("Open Office", RoomRule::new(DaylightRequirement::Preferred))
        .with_room_rule(
            "Restroom",
            RoomRule::default().with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_room_rule(
            "Break Room",
            RoomRule::new(DaylightRequirement::Preferred)
                .with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_room_rule(
            "Server",
            RoomRule::default().with_constraint(PlacementConstraint::Core),
        )
        .with_adjacency("Reception", "Conference", MustConnect)
        .with_adjacency("Reception", "Office", PreferNear)
        .with_adjacency("Open Office", "Office", ShouldAdjacent)
        .with_adjacency("Break Room", "Open Office", PreferNear)
        .with_adjacency("Restroom", "Break Room", ShouldAdjacent)
        .with_adjacency("Server", "Reception", ShouldSeparate)
        .with_adjacency("Storage", "Conference", MustSeparate)
}

pub fn office_program() -> Vec<RoomRequest> {
    vec![
        RoomRequest::new("Reception", 18.0, 14.0),
        RoomRequest::new("Conference", 16.0, 14.0),
        RoomRequest::new("Office", 12.0, 12.0),
        RoomRequest::new("Office", 12.0, 12.0),
        RoomRequest::new("Office", 12.0, 12.0),
        RoomRequest::new("Open Office", 24.0, 16.0),
        RoomRequest::new("Break Room", 14.0, 12.0),
        RoomRequest::new("Restroom", 8.0, 10.0),
        RoomRequest::new("Restroom", 8.0, 10.0),
        RoomRequest::new("Storage", 8.0, 8.0),
        RoomRequest::new("Server", 8.0, 6.0),
    ]
}

pub fn residential_rules() -> TableRules {
    use AdjacencyStrength::*;

    TableRules::new()
        .with_room("Entry", Zone::Public, PlacementPriority::NearEntry)
        .with_room("Living", Zone::Public, PlacementPriority::NearEntry)
        .with_room("Dining", Zone::SemiPublic, PlacementPriority::Middle)
        .with_room("Kitchen", Zone::SemiPublic, PlacementPriority::Middle)
        .with_room("Bedroom", Zone::Private, PlacementPriority::Back)
        .with_room("Primary Bedroom", Zone::Private, PlacementPriority::Back)
        .with_room("Bath", Zone::Service, PlacementPriority::Middle)
        .with_room("Laundry", Zone::Service, PlacementPriority::Back)
        .with_room_rule("Living", RoomRule::new(DaylightRequirement::Required))
        .with_room_rule("Bedroom", RoomRule::new(DaylightRequirement::Required))
        .with_room_rule(
            "Primary Bedroom",
            RoomRule::new(DaylightRequirement::Required)
                .with_constraint(PlacementConstraint::Corner),
        )
        .with_room_rule(
            "Kitchen",
            RoomRule::new(DaylightRequirement::Preferred)
                .with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_room_rule(
            "Bath",
            RoomRule::default().with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_room_rule(
            "Laundry",
            RoomRule::default().with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_adjacency("Entry", "Living", MustConnect)
        .with_adjacency("Kitchen", "Dining", MustConnect)
        .with_adjacency("Living", "Dining", ShouldAdjacent)
        .with_adjacency("Bedroom", "Bath", PreferNear)
        .with_adjacency("Primary Bedroom", "Bath", ShouldAdjacent)
        .with_adjacency("Bedroom", "Living", ShouldSeparate)
        .with_adjacency("Laundry", "Living", MustSeparate)
}

pub fn residential_program() -> Vec<RoomRequest> {
    vec![
        RoomRequest::new("Entry", 8.0, 8.0),
        RoomRequest::new("Living", 18.0, 16.0),
        RoomRequest::new("Dining", 12.0, 12.0),
        RoomRequest::new("Kitchen", 12.0, 12.0),
        RoomRequest::new("Primary Bedroom", 16.0, 14.0),
        RoomRequest::new("Bedroom", 12.0, 12.0),
        RoomRequest::new("Bedroom", 12.0, 11.0),
        RoomRequest::new("Bath", 8.0, 10.0),
        RoomRequest::new("Bath", 8.0, 8.0),
        RoomRequest::new("Laundry", 8.0, 6.0),
    ]
}
