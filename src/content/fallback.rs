//! Bundled fallback pools used to top up a short batch when live
//! acquisition under-delivers.

use crate::core::models::{ContentItem, ContentKind, Expression, Idiom};

fn idiom(phrase: &str, meaning: &str, examples: &str) -> ContentItem {
    ContentItem::Idiom(Idiom {
        id: None,
        phrase: phrase.to_string(),
        meaning: meaning.to_string(),
        examples: examples.to_string(),
    })
}

fn expression(
    indonesian: &str,
    english: &str,
    examples: &str,
    alt_phrases: Option<&str>,
) -> ContentItem {
    ContentItem::Expression(Expression {
        id: None,
        indonesian: indonesian.to_string(),
        english: english.to_string(),
        examples: examples.to_string(),
        alt_phrases: alt_phrases.map(str::to_string),
    })
}

pub fn pool_for(kind: ContentKind) -> Vec<ContentItem> {
    match kind {
        ContentKind::Idiom => fallback_idioms(),
        ContentKind::Expression => fallback_expressions(),
    }
}

pub fn fallback_idioms() -> Vec<ContentItem> {
    vec![
        idiom(
            "Bite off more than you can chew",
            "To take on more responsibility than you can manage",
            "🇬🇧 Don't bite off more than you can chew by taking on three projects at once.\n🇮🇩 Jangan terlalu memaksakan diri dengan mengambil tiga proyek sekaligus.",
        ),
        idiom(
            "Hit the nail on the head",
            "To describe exactly what is causing a situation or problem",
            "🇬🇧 You hit the nail on the head when you said the project failed due to poor communication.\n🇮🇩 Kamu tepat sekali ketika mengatakan proyek itu gagal karena komunikasi yang buruk.",
        ),
        idiom(
            "Hit the ground running",
            "To start something and proceed at a fast pace with great enthusiasm",
            "🇬🇧 She hit the ground running in her new job and impressed everyone with her quick progress.\n🇮🇩 Dia langsung bekerja dengan sangat baik di pekerjaan barunya dan membuat semua orang terkesan dengan kemajuan cepatnya.",
        ),
        idiom(
            "Break the ice",
            "To do or say something to reduce tension or make people feel more comfortable",
            "🇬🇧 He told a joke to break the ice at the beginning of the meeting.\n🇮🇩 Dia menceritakan lelucon untuk mencairkan suasana di awal pertemuan.",
        ),
        idiom(
            "Cut corners",
            "To do something in the easiest or cheapest way, often sacrificing quality",
            "🇬🇧 The builder cut corners when renovating the house, and now we're having problems.\n🇮🇩 Pembangun mengambil jalan pintas saat merenovasi rumah, dan sekarang kita mengalami masalah.",
        ),
        idiom(
            "Pull someone's leg",
            "To joke with someone by telling them something untrue",
            "🇬🇧 Don't worry, I'm just pulling your leg! I didn't really lose your phone.\n🇮🇩 Jangan khawatir, aku hanya bercanda! Aku tidak benar-benar menghilangkan ponselmu.",
        ),
        idiom(
            "Under the weather",
            "Feeling ill or unwell",
            "🇬🇧 I'm feeling a bit under the weather today, so I might stay home.\n🇮🇩 Aku merasa sedikit tidak enak badan hari ini, jadi mungkin aku akan tinggal di rumah.",
        ),
        idiom(
            "Cost an arm and a leg",
            "To be extremely expensive",
            "🇬🇧 Living in the city center costs an arm and a leg these days.\n🇮🇩 Tinggal di pusat kota sangat mahal akhir-akhir ini.",
        ),
        idiom(
            "Beat around the bush",
            "To avoid talking about something directly",
            "🇬🇧 Stop beating around the bush and tell me what happened!\n🇮🇩 Berhenti berbelit-belit dan katakan padaku apa yang terjadi!",
        ),
        idiom(
            "Once in a blue moon",
            "Very rarely; almost never",
            "🇬🇧 We see each other once in a blue moon since she moved abroad.\n🇮🇩 Kami sangat jarang bertemu sejak dia pindah ke luar negeri.",
        ),
    ]
}

pub fn fallback_expressions() -> Vec<ContentItem> {
    vec![
        expression(
            "Kebal ::x::",
            "Immune to ::x::",
            "🇬🇧 It seems that he's immune to sarcasm\n🇮🇩 Kayaknya dia udah kebal sama sindiran deh",
            Some("Udah biasa sama ::x::"),
        ),
        expression(
            "Sudah di ujung ::x::",
            "On the brink of ::x::",
            "🇬🇧 Their business is on the brink of collapse\n🇮🇩 Bisnis mereka udah di ujung kehancuran",
            Some("Hampir ::x::"),
        ),
        expression(
            "Baru ::x:: udah ::y::",
            "Barely ::x::, already ::y::",
            "🇬🇧 Barely started the job, already complaining\n🇮🇩 Baru masuk kerja udah ngeluh aja",
            None,
        ),
        expression(
            "Ngga ada ::x:: nya sama sekali",
            "There's no trace of ::x:: at all",
            "🇬🇧 There's no trace of effort at all in this work\n🇮🇩 Ngga ada usahanya sama sekali di kerjaan ini",
            Some("::x:: nya nol besar"),
        ),
        expression(
            "Lancar-lancar aja",
            "Uneventful",
            "🇬🇧 The flight was uneventful, just the way I like it\n🇮🇩 Flight-nya lancar-lancar aja, aman lah",
            Some("Aman-aman aja"),
        ),
        expression(
            "Ngga ngeh",
            "It didn't click / didn't catch that",
            "🇬🇧 Sorry, I didn't catch that. Could you repeat it?\n🇮🇩 Sori, gue ngga ngeh. Bisa diulang?",
            Some("Ngga mudeng"),
        ),
        expression(
            "Mager",
            "Can't be bothered",
            "🇬🇧 I can't be bothered to go out today, let's just order in\n🇮🇩 Mager banget hari ini, delivery aja yuk",
            Some("Males gerak"),
        ),
        expression(
            "Garing",
            "That fell flat",
            "🇬🇧 That joke fell flat, nobody laughed\n🇮🇩 Garing banget candaannya, ga ada yang ketawa",
            Some("Jayus"),
        ),
        expression(
            "Keburu ::x::",
            "Still time to ::x::",
            "🇬🇧 Don't worry, there's still time to catch the movie\n🇮🇩 Santai aja, masih keburu kok nonton film-nya",
            None,
        ),
        expression(
            "Terlanjur ::x::",
            "Already went ahead and ::x::",
            "🇬🇧 I already went ahead and bought it, can't return it now\n🇮🇩 Udah terlanjur beli nih, ga bisa dibalikin lagi",
            Some("Kadung ::x::"),
        ),
    ]
}
