//! Built-in demo site used when no content source is configured.

use crate::card::{Record, compose_card};
use crate::content::{BlockId, ContentBlock, Page};
use crate::scanner::SiteContent;

const LOREM_LONG: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nulla et turpis libero. \
Nulla facilisi. Donec vitae convallis orci, at luctus lacus. Phasellus eget nunc est. Cras et posuere felis, \
eu lacinia odio. Donec at quam et enim posuere tincidunt a a ante. Duis vitae ligula eu eros dignissim maximus. \
Praesent venenatis, sapien vel facilisis tristique, libero turpis eleifend justo, id rhoncus arcu augue quis mauris. \
Aenean pellentesque elit eget odio maximus iaculis. Sed porta a nibh ac sodales. Aliquam et lorem vitae nulla \
pretium aliquam.";

const LOREM_SHORT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nulla vel metus malesuada, \
pulvinar nisl vel, fringilla felis.";

pub fn movie_records() -> Vec<Record> {
    vec![
        Record::new()
            .field("name", "The Shawshank Redemption")
            .field("type", "movie")
            .field("year", 1994)
            .field("director", "Frank Darabont"),
        Record::new()
            .field("name", "The Godfather")
            .field("type", "movie")
            .field("year", 1972)
            .field("director", "Francis Ford Coppola"),
        Record::new()
            .field("name", "The Dark Knight")
            .field("type", "movie")
            .field("year", 2008)
            .field("director", "Christopher Nolan"),
    ]
}

pub fn pages() -> Vec<Page> {
    vec![homepage(), services(), about()]
}

pub fn content() -> SiteContent {
    SiteContent {
        pages: pages(),
        card_sets: Vec::new(),
    }
}

fn homepage() -> Page {
    let movies = movie_records();

    Page {
        id: Some(BlockId::Number(1)),
        title: "Homepage".into(),
        slug: "/".into(),
        content: vec![
            ContentBlock::heading(1, "Welcome to our website!").with_id(1),
            ContentBlock::paragraph(LOREM_LONG).with_id(2),
            ContentBlock::Quote {
                id: Some(BlockId::Number(3)),
                content: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.".into(),
                author: "John Doe".into(),
            },
            ContentBlock::Image {
                id: Some(BlockId::Number(4)),
                src: "https://example.com/image.jpg".into(),
                alt: "Example Image".into(),
                caption: Some("This is an example image".into()),
            },
            compose_card(&movies[1], "name").with_id(2),
            compose_card(&movies[2], "name").with_id(3),
            ContentBlock::card(vec![
                ContentBlock::heading(2, "Card Heading"),
                ContentBlock::paragraph("This is a paragraph in the card."),
                ContentBlock::link("https://example.com", "Visit Example.com"),
            ])
            .with_id(5),
        ],
    }
}

fn services() -> Page {
    let mut content = vec![
        ContentBlock::heading(3, "Our Services").with_id(1),
        ContentBlock::paragraph("We offer a range of services to meet your needs.").with_id(2),
    ];
    for n in 1..=3i64 {
        content.push(ContentBlock::heading(3, format!("Service {}", n)).with_id(n * 2 + 1));
        content.push(ContentBlock::paragraph(LOREM_SHORT).with_id(n * 2 + 2));
    }

    Page {
        id: Some(BlockId::from("our-services")),
        title: "Our Services".into(),
        slug: "/our-services".into(),
        content,
    }
}

fn about() -> Page {
    Page {
        id: Some(BlockId::Number(2)),
        title: "About Us".into(),
        slug: "/about".into(),
        content: vec![
            ContentBlock::heading(1, "Who We Are").with_id(1),
            ContentBlock::paragraph(LOREM_LONG).with_id(2),
            ContentBlock::list(false, ["Item 1", "Item 2", "Item 3"]).with_id(3),
        ],
    }
}
