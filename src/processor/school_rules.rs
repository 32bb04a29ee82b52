//! Ordered rewrite table for institute names.
//!
//! Patterns run case-insensitively against preprocessed text (lowercase,
//! letters, digits and single spaces). Earlier rules are specialisations of
//! later ones, so the order must not change. `${1}` re-emits a captured
//! letter where a rule only inserts a space before it.

pub const SCHOOL_REPLACEMENTS: &[(&str, &str)] = &[
    // zilla parishad abbreviations
    (r"\bz[\s\.]*p[\s\.]*h[\s\.]*s\b", "zilla parishad high school"),
    (r"\bzphs\b", "zilla parishad high school"),
    (r"\bzppps\b", "zilla parishad primary school"),
    (r"\bzpps\b", "zilla parishad primary school"),
    (r"\bz[\s\.]*p[\s\.]*p[\s\.]*s\b", "zilla parishad primary school"),
    (r"\bz[\s\.]*p\b", "zilla parishad"),
    // glued prefixes
    (r"\bnmc([a-z])", "nmc ${1}"),
    (r"\bbmc([a-z])", "bmc ${1}"),
    (r"\bschool([a-z])", "school ${1}"),
    (r"\bhighschool([a-z])", "high school ${1}"),
    (r"\bjr\b", "junior"),
    (r"\bjr\.\b", "junior"),
    (r"\bgirsl\b", "girls"),
    (r"\bmar\b", "marathi"),
    (r"\br[\s\.]*a[\s\.]*a[\s\.]*r\b", "rashtrasant acharya anand rushiji"),
    (r"\br[\s\.]*a[\s\.]*a[\s\.]\b", "rashtrasant acharya anand "),
    (r"\br[\s\.]*a[\s\.]\b", "rashtrasant acharya "),
    (r"\brushini\b", "rushiji"),
    (r"\bhighschool\b", "high school"),
    (r"\bhs\b", "high school"),
    (r"\bpraimari\b", "primary"),
    (r"\bh[\s\.]*s\b", "high school"),
    (r"\bnasik\b", "nashik"),
    (r"\bpriymari\b", "primary"),
    (r"\bsec\b", "secondary"),
    (r"\bsec\.\b", "secondary"),
    (r"\bmedium\b", ""),
    (r"\bmediym\b", ""),
    (r"\bpeathamic\b", "prathmik"),
    // madhyamik spellings
    (r"\bmadhymik\b", "madhyamik"),
    (r"\bmadhymic\b", "madhyamik"),
    (r"\bmadhamik\b", "madhyamik"),
    (r"\bmadhyamic\b", "madhyamik"),
    (r"\bmadyamik\b", "madhyamik"),
    (r"\bmadymik\b", "madhyamik"),
    (r"\bmadhya\b", "madhyamik"),
    (r"\bmadh\b", "madhyamik"),
    (r"\bmadhy\b", "madhyamik"),
    (r"\bm[\s]v\b", "madhyamik vidyalaya"),
    // vidyalaya spellings
    (r"\bvidy\b", "vidyalaya"),
    (r"\bvidya[\s]mandir\b", "vidyamandir"),
    (r"\bvidya\b", "vidyalaya"),
    (r"\bvidyslay\b", "vidyalaya"),
    (r"\bvidylaya\b", "vidyalaya"),
    (r"\bvidhylai\b", "vidyalaya"),
    (r"\bvidhylay\b", "vidyalaya"),
    (r"\bvidhyalaya\b", "vidyalaya"),
    (r"\bvidyalay\b", "vidyalaya"),
    (r"\bvudyalay\b", "vidyalaya"),
    (r"\bvidhyalay\b", "vidyalaya"),
    (r"\bvidhalay\b", "vidyalaya"),
    (r"\bvidalaya\b", "vidyalaya"),
    (r"\bvidhyal\b", "vidyalaya"),
    (r"\bvidyalya\b", "vidyalaya"),
    (r"\bvidyalays\b", "vidyalaya"),
    (r"\beng\b", "english"),
    (r"\bveddharine\b", "veddharini"),
    (r"\bvasudev\b", "vasudeo"),
    (r"\bprath\b", "prathmik"),
    (r"\bps[\s]\b", "prathmik shala "),
    (r"\bprashala\b", "prathmik shala"),
    (r"\bbal[\s]vikas\b", "balvikas"),
    (r"\bmadhy\.\b", "madhyamik"),
    (r"\btulsabaikawalvidyalay\.\b", "tulsabai kawal vidyalaya"),
    (r"\btmc\b", "thane municipal corparation"),
    (r"\btjc\b", "t.j.chavan"),
    (r"\brahtriy\.\b", "rashtriya"),
    (r"\bmuniciple\b", "municipal"),
    (r"\bmuni\b", "municipal"),
    (r"\bmun\b", "municipal"),
    (r"\bt[\s\.]*m[\s\.]*c\b", "thane municipal corporation"),
    (r"\btb", "t."),
    (r"\bjb", "j."),
    (r"\beng(\.|lish)?\b", "english"),
    (r"\bsvkm[\s]sb", "SVKM's"),
    (r"\bsukhadev\b", "sukhdev"),
    (r"\bsadiqueshah\b", "sadique shah"),
    // possessives
    (r"\bxavier(?:'s|s|\s+s)?\b", "xavier's"),
    (r"\bst\b\.?", "st."),
    (r"\bscho\b", "school"),
    (r"\bpaul(?:'s|s|\s+s)?\b", "paul's"),
    (r"\bpatrick(?:'s|s|\s+s)?\b", "patrick's"),
    (r"\bmira(?:'s|s|\s+s)?\b", "mira's"),
    (r"\bmary(?:'s|s|\s+s)?\b", "mary's"),
    (r"\bjude(?:'s|s|\s+s)?\b", "jude's"),
    (r"\bjoseph(?:'s|s|\s+s)?\b", "joseph's"),
    (r"\bhelena(?:'s|s|\s+s)?\b", "helena's"),
    (r"\bhari(?:'s|s|\s+s)?\b", "hari's"),
    (r"\bgeorge(?:'s|s|\s+s)?\b", "george's"),
    (r"\bfrancis(?:'s|s|\s+s)?\b", "francis's"),
    (r"\banthony(?:'s|s|\s+s)?\b", "anthony's"),
    (r"\bandrew(?:'s|s|\s+s)?\b", "andrew's"),
    (r"\banne(?:'s|s|\s+s)?\b", "anne's"),
    (r"\bandrewd\b", "andrew's"),
    (r"\bboy\s+s\b", "boy's"),
    (r"\bgirl\s+s\b", "girl's"),
    (r"\bpry\b", "primary"),
    (r"\bpri\b", "pre"),
    (r"\bsndt\b", "s.n.d.t."),
    (r"\bsmt\b\.?", "smt."),
    (r"\bsies\b", "SIES"),
    (
        r"\bShrrrammitrrmandalparthmikvidyamandir\b",
        "shriram mitra mandal prathmik vidyamandir",
    ),
    (r"\bShreerammitramandalsanchalit\b", "shreeram mitra mandal sanchalit"),
    (r"\bprathamik\b", "prathmik"),
    (r"\bchauhan\b", "chavan"),
    (r"\bshri[\s]c[\s]s[\s]\b", "shri chhatrapati shivaji "),
    (r"\bshri[\s]c[\s]s[\s]m[\s]\b", "shri chhatrapati shivaji maharaj "),
    (r"\bbha\b", "b"),
    (r"\bmiras\b", "mira's"),
    (r"\bmaharastra\b", "maharashtra"),
    (r"\bsamart\b", "samarth"),
    (r"\bramktushna\b", "ramkrushna"),
    (r"\bshiriram\b", "shriram"),
    (r"\brsmnath\b", "ramnath"),
    (r"\bsent\b\.?", "st."),
    (r"\bpraymari\b", "primary"),
    (r"\bphilomina\b", "philomena"),
    (r"\bfule\b", "phule"),
    (r"\badarsh\b", "aadarsh"),
    (r"\badarash\b", "aadarshn"),
    (r"\bramdev\b", "ramdeo"),
    (r"\bmed\b", ""),
    (r"\bapg\s+s\b", "apj"),
    (r"\bpvg[\s]s\b", "PVG's"),
    (r"\bwomen[\s]s\b", "women's"),
    (r"\bn[\s]m[\s]c[\s]\b", "nmc "),
    (r"\bmatostri\b", "matoshri"),
    (r"\bmatoshree\b", "matoshri"),
    (r"\bprimari\b", "primary"),
    (r"\bsavitri[\s]bai\b", "savitribai"),
    (r"\bmalojieaje\b", "malojiraje"),
    (r"\bmmahtma\b", "mahatma"),
    (r"\bucch\b", "uccha"),
    (r"\blok[\s]nayak\b", "loknayak"),
    (r"\byshwantrav\b", "yeshwantrav"),
    (r"\bshishy\b", "shishu"),
    (r"\bshishuvihar\b", "shishu vihar"),
    (r"\bvlasses\b", "classes"),
    (r"\bschools\b", "school"),
    (r"\baranyashwar\b", "aranyeshwar"),
    (r"\bchankya\b", "chanakya"),
    (r"\bvisapute\b", "vispute"),
    (r"\basjram\b", "shram"),
    (r"\bashramshala\b", "ashram shala"),
    (r"\bashramschool\b", "ashram school"),
    (r"\bcoolege\b", "college"),
    (r"\b[\s]va[\s]\b", " "),
    (r"\bgujrati\b", "gujarati"),
    (r"\bsch\b", "school"),
    (r"\bschooh\b", "school"),
    (r"\bh[\s]sch\b", "high school"),
    (r"\bcollage\b", "college"),
    (r"\brashtriy\b", "rashtriya"),
    (r"\btakshshila\b", "takshashila"),
    (r"\bshamanad\b", "shamanand"),
    (r"\bscoll\b", "school"),
    (r"\bshool\b", "school"),
    (r"\bvidhyamandir\b", "vidyamandir"),
    (r"\bsagaracademy\b", "sagar academy"),
    (r"\bwamanbaba\b", "vamanbaba"),
    (r"\bshikchi\b", "sikchi"),
    (r"\bjagdamba\b", "jagadamba"),
    (r"\bshivajividyalaya\b", "shivaji vidyalaya"),
    (r"\blalita[\s]prasad\b", "lalitaprasad"),
    (r"\bchatrapati\b", "chhatrapati"),
    (r"\bchhatrpti\b", "chhatrapati"),
    (r"\bvijay[\s]mala\b", "vijaymala"),
    (r"\bsantoshbhai[\s]mehta\b", "santoshbhai mehta"),
    (r"\bsantoshbhaimehta\b", "santoshbhai mehta"),
    (r"\brayreshwer\b", "rayreshwar"),
    (r"\banandrushiji\b", "anand rushiji"),
    (r"\bamebedkar\b", "ambedkar"),
    (r"\brajesveri\b", "rajeshwari"),
    (r"\brajeshveri\b", "rajeshwari"),
    (r"\bbhosle\b", "bhosale"),
    (r"\brandeo\b", "ramdeo"),
    (r"\brungha\b", "rungta"),
    (r"\bpriyasarshani\b", "priyadarshini"),
    (r"\bparshuram[\s]nike\b", "parshuram naik"),
    (r"\bnagnsth\b", "nagnath"),
    (r"\bcerter\b", "centre"),
    (r"\bcenter\b", "centre"),
    (r"\bgurugi\b", "guruji"),
    (r"\bhiray\b", "hire"),
    (r"\binst\b", "institute"),
    (r"^\d+$", ""),
];
