use super::*;

#[test]
fn names_round_trip() {
    for &rarity in Rarity::all() {
        let parsed: Rarity = rarity.name().parse().unwrap();
        assert_eq!(parsed, rarity, "round-trip failed for {:?}", rarity);
    }
}

#[test]
fn bulk_rarity_is_title_cased() {
    assert_eq!(Rarity::for_printing("Lightning Bolt", "common"), Ok(Rarity::Common));
    assert_eq!(Rarity::for_printing("Tarmogoyf", "mythic"), Ok(Rarity::Mythic));
    assert_eq!(Rarity::for_printing("Black Lotus", "SPECIAL"), Ok(Rarity::Special));
}

#[test]
fn basic_lands_become_land() {
    for name in BASIC_LAND_NAMES {
        assert_eq!(Rarity::for_printing(name, "common"), Ok(Rarity::Land));
        assert_eq!(Rarity::for_printing(name, "rare"), Ok(Rarity::Land));
    }
}

#[test]
fn non_basic_land_keeps_rarity() {
    assert_eq!(Rarity::for_printing("Snow-Covered Island", "common"), Ok(Rarity::Common));
    assert_eq!(Rarity::for_printing("Wastes", "common"), Ok(Rarity::Common));
}

#[test]
fn unknown_rarity_is_rejected() {
    assert_eq!(
        Rarity::for_printing("Some Card", "legendary"),
        Err(ParseRarityError("Legendary".to_string()))
    );
    assert!("common".parse::<Rarity>().is_err());
}

#[test]
fn title_case_words() {
    assert_eq!(title_case("mythic"), "Mythic");
    assert_eq!(title_case("uNCOMMON"), "Uncommon");
    assert_eq!(title_case("two words"), "Two Words");
    assert_eq!(title_case(""), "");
}
