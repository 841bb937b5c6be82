use crate::model::bank::Bank;

#[derive(Debug, Clone, Copy)]
pub struct NewsItem {
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub url: &'static str,
    pub age: &'static str,
}

const BBVA_NEWS: [NewsItem; 3] = [
    NewsItem {
        title: "BBVA reaches 23.2% of its share buyback programme",
        summary: "The bank speeds up its buyback as part of its shareholder value plan.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/bbva-alcanza-23-2-programa-124000511.html",
        age: "2 hours ago",
    },
    NewsItem {
        title: "Last hours to collect the record 1.842bn dividend",
        summary: "BBVA closes the largest dividend payment in its history.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/bbva-lanza-emisi%C3%B3n-bono-coco-092000418.html",
        age: "4 hours ago",
    },
    NewsItem {
        title: "BBVA: over 15% upside and 5bn in buybacks",
        summary: "Analysts point to further upside after the authorised buybacks.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/bbva-potencial-15-recompras-acciones-101000927.html",
        age: "1 day ago",
    },
];

const SANTANDER_NEWS: [NewsItem; 3] = [
    NewsItem {
        title: "Banco Santander hits new highs as the Polish unit sale advances",
        summary: "The bank reaches yearly highs after its Central European divestment.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/banco-santander-m%C3%A1ximos-bolsa-venta-084000781.html",
        age: "3 hours ago",
    },
    NewsItem {
        title: "Santander and BBVA keep momentum and could extend gains in November",
        summary: "Both lenders remain strong after a solid quarter.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/santander-bbva-seguir-subiendo-noviembre-121000271.html",
        age: "6 hours ago",
    },
    NewsItem {
        title: "Santander crosses a landmark after fresh record highs",
        summary: "Market capitalisation nears record levels, leading the sector.",
        source: "Yahoo Finance",
        url: "https://es.finance.yahoo.com/noticias/santander-m%C3%A1ximos-alcanza-m%C3%A1gica-cifra-093000403.html",
        age: "1 day ago",
    },
];

pub fn headlines(bank: Bank) -> &'static [NewsItem] {
    match bank {
        Bank::Bbva => &BBVA_NEWS,
        Bank::Santander => &SANTANDER_NEWS,
    }
}
