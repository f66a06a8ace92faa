//! # Name interning
//!
//! Hash tables that map names to dense ids and detect duplicate declarations. Three instances are
//! used per load: one for row names, one for column names, and one keyed by the (column, row) name
//! pair to guard against repeated coefficients.
//!
//! A table is sized once, from an empirical estimate, to a prime bucket count and is never
//! resized. Lookups stay O(1) expected without any rehashing cost, which pays off because the
//! relevant counts are known before the detailed parse starts.

/// Smallest prime above each multiple of 1000, up to one million.
///
/// Bucket counts are drawn from this table, so the requested capacity only fixes an index here.
#[rustfmt::skip]
const PRIME_SIZES: [usize; 1000] = [
    1009, 2003, 3001, 4001, 5003, 6007, 7001, 8009,
    9001, 10007, 11003, 12007, 13001, 14009, 15013, 16001,
    17011, 18013, 19001, 20011, 21001, 22003, 23003, 24001,
    25013, 26003, 27011, 28001, 29009, 30011, 31013, 32003,
    33013, 34019, 35023, 36007, 37003, 38011, 39019, 40009,
    41011, 42013, 43003, 44017, 45007, 46021, 47017, 48017,
    49003, 50021, 51001, 52009, 53003, 54001, 55001, 56003,
    57037, 58013, 59009, 60013, 61001, 62003, 63029, 64007,
    65003, 66029, 67003, 68023, 69001, 70001, 71011, 72019,
    73009, 74017, 75011, 76001, 77003, 78007, 79031, 80021,
    81001, 82003, 83003, 84011, 85009, 86011, 87011, 88001,
    89003, 90001, 91009, 92003, 93001, 94007, 95003, 96001,
    97001, 98009, 99013, 100003, 101009, 102001, 103001, 104003,
    105019, 106013, 107021, 108007, 109001, 110017, 111029, 112019,
    113011, 114001, 115001, 116009, 117017, 118033, 119027, 120011,
    121001, 122011, 123001, 124001, 125003, 126001, 127031, 128021,
    129001, 130003, 131009, 132001, 133013, 134033, 135007, 136013,
    137029, 138007, 139021, 140009, 141023, 142007, 143053, 144013,
    145007, 146009, 147011, 148013, 149011, 150001, 151007, 152003,
    153001, 154001, 155003, 156007, 157007, 158003, 159013, 160001,
    161009, 162007, 163003, 164011, 165001, 166013, 167009, 168013,
    169003, 170003, 171007, 172001, 173021, 174007, 175003, 176017,
    177007, 178001, 179021, 180001, 181001, 182009, 183023, 184003,
    185021, 186007, 187003, 188011, 189011, 190027, 191021, 192007,
    193003, 194003, 195023, 196003, 197003, 198013, 199021, 200003,
    201007, 202001, 203011, 204007, 205019, 206009, 207013, 208001,
    209021, 210011, 211007, 212029, 213019, 214003, 215051, 216023,
    217001, 218003, 219001, 220009, 221021, 222007, 223007, 224011,
    225023, 226001, 227011, 228013, 229003, 230003, 231001, 232003,
    233021, 234007, 235003, 236017, 237011, 238001, 239017, 240007,
    241013, 242009, 243011, 244003, 245023, 246011, 247001, 248021,
    249017, 250007, 251003, 252001, 253003, 254003, 255007, 256019,
    257003, 258019, 259001, 260003, 261011, 262007, 263009, 264007,
    265003, 266003, 267017, 268003, 269023, 270001, 271003, 272003,
    273001, 274007, 275003, 276007, 277003, 278017, 279001, 280001,
    281023, 282001, 283001, 284003, 285007, 286001, 287003, 288007,
    289001, 290011, 291007, 292021, 293021, 294001, 295007, 296011,
    297019, 298013, 299011, 300007, 301013, 302009, 303007, 304009,
    305017, 306011, 307009, 308003, 309007, 310019, 311009, 312007,
    313003, 314003, 315011, 316003, 317003, 318001, 319001, 320009,
    321007, 322001, 323003, 324011, 325001, 326023, 327001, 328007,
    329009, 330017, 331013, 332009, 333019, 334021, 335009, 336029,
    337013, 338017, 339023, 340007, 341017, 342037, 343019, 344017,
    345001, 346013, 347003, 348001, 349007, 350003, 351011, 352007,
    353011, 354001, 355007, 356023, 357031, 358031, 359003, 360007,
    361001, 362003, 363017, 364027, 365003, 366001, 367001, 368021,
    369007, 370003, 371027, 372013, 373003, 374009, 375017, 376001,
    377011, 378011, 379007, 380041, 381001, 382001, 383011, 384001,
    385001, 386017, 387007, 388009, 389003, 390001, 391009, 392011,
    393007, 394007, 395023, 396001, 397013, 398011, 399023, 400009,
    401017, 402023, 403001, 404009, 405001, 406013, 407023, 408011,
    409007, 410009, 411001, 412001, 413009, 414013, 415013, 416011,
    417007, 418007, 419047, 420001, 421009, 422029, 423001, 424001,
    425003, 426007, 427001, 428003, 429007, 430007, 431017, 432001,
    433003, 434009, 435037, 436003, 437011, 438001, 439007, 440009,
    441011, 442003, 443011, 444001, 445001, 446003, 447001, 448003,
    449003, 450001, 451013, 452009, 453023, 454009, 455003, 456007,
    457001, 458009, 459007, 460013, 461009, 462013, 463003, 464003,
    465007, 466009, 467003, 468001, 469009, 470021, 471007, 472019,
    473009, 474017, 475037, 476009, 477011, 478001, 479023, 480013,
    481001, 482017, 483017, 484019, 485021, 486023, 487007, 488003,
    489001, 490001, 491003, 492007, 493001, 494023, 495017, 496007,
    497011, 498013, 499021, 500009, 501001, 502001, 503003, 504001,
    505027, 506047, 507029, 508009, 509023, 510007, 511001, 512009,
    513001, 514001, 515041, 516017, 517003, 518017, 519011, 520019,
    521009, 522017, 523007, 524047, 525001, 526027, 527053, 528001,
    529003, 530017, 531017, 532001, 533003, 534007, 535013, 536017,
    537001, 538001, 539003, 540041, 541001, 542021, 543017, 544001,
    545023, 546001, 547007, 548003, 549001, 550007, 551003, 552001,
    553013, 554003, 555029, 556007, 557017, 558007, 559001, 560017,
    561019, 562007, 563009, 564013, 565013, 566011, 567011, 568019,
    569003, 570001, 571001, 572023, 573007, 574003, 575009, 576001,
    577007, 578021, 579011, 580001, 581029, 582011, 583007, 584011,
    585019, 586009, 587017, 588011, 589021, 590021, 591023, 592019,
    593003, 594023, 595003, 596009, 597031, 598007, 599003, 600011,
    601021, 602029, 603011, 604001, 605009, 606017, 607001, 608011,
    609043, 610031, 611011, 612011, 613007, 614041, 615019, 616003,
    617011, 618029, 619007, 620003, 621007, 622009, 623003, 624007,
    625007, 626009, 627017, 628013, 629003, 630017, 631003, 632029,
    633001, 634003, 635003, 636017, 637001, 638023, 639007, 640007,
    641051, 642011, 643009, 644009, 645011, 646003, 647011, 648007,
    649001, 650011, 651017, 652019, 653033, 654001, 655001, 656023,
    657017, 658001, 659011, 660001, 661009, 662003, 663001, 664009,
    665011, 666013, 667013, 668009, 669023, 670001, 671003, 672019,
    673019, 674017, 675029, 676007, 677011, 678023, 679033, 680003,
    681001, 682001, 683003, 684007, 685001, 686003, 687007, 688003,
    689021, 690037, 691001, 692009, 693019, 694019, 695003, 696019,
    697009, 698017, 699001, 700001, 701009, 702007, 703013, 704003,
    705011, 706001, 707011, 708007, 709043, 710009, 711001, 712007,
    713021, 714029, 715019, 716003, 717001, 718007, 719009, 720007,
    721003, 722011, 723029, 724001, 725009, 726007, 727003, 728003,
    729019, 730003, 731033, 732023, 733003, 734003, 735001, 736007,
    737017, 738011, 739003, 740011, 741001, 742009, 743027, 744019,
    745001, 746017, 747037, 748003, 749011, 750019, 751001, 752009,
    753001, 754003, 755009, 756011, 757019, 758003, 759001, 760007,
    761003, 762001, 763001, 764003, 765007, 766021, 767017, 768013,
    769003, 770027, 771011, 772001, 773021, 774001, 775007, 776003,
    777001, 778013, 779003, 780029, 781003, 782003, 783007, 784009,
    785003, 786001, 787021, 788009, 789001, 790003, 791003, 792023,
    793043, 794009, 795001, 796001, 797003, 798023, 799003, 800011,
    801001, 802007, 803027, 804007, 805019, 806009, 807011, 808019,
    809023, 810013, 811037, 812011, 813013, 814003, 815029, 816019,
    817013, 818011, 819001, 820037, 821003, 822007, 823001, 824017,
    825001, 826019, 827009, 828007, 829001, 830003, 831023, 832003,
    833009, 834007, 835001, 836047, 837017, 838003, 839009, 840023,
    841003, 842003, 843043, 844001, 845003, 846037, 847009, 848017,
    849019, 850009, 851009, 852011, 853007, 854017, 855031, 856021,
    857009, 858001, 859003, 860009, 861001, 862009, 863003, 864007,
    865001, 866003, 867001, 868019, 869017, 870007, 871001, 872017,
    873017, 874001, 875011, 876011, 877003, 878011, 879001, 880001,
    881003, 882017, 883013, 884003, 885023, 886007, 887017, 888001,
    889001, 890003, 891001, 892019, 893003, 894011, 895003, 896003,
    897007, 898013, 899009, 900001, 901007, 902009, 903017, 904019,
    905011, 906007, 907019, 908003, 909019, 910003, 911003, 912007,
    913013, 914021, 915007, 916031, 917003, 918011, 919013, 920011,
    921001, 922021, 923017, 924019, 925019, 926017, 927001, 928001,
    929003, 930011, 931003, 932003, 933001, 934001, 935003, 936007,
    937003, 938017, 939007, 940001, 941009, 942013, 943003, 944003,
    945031, 946003, 947027, 948007, 949001, 950009, 951001, 952001,
    953023, 954001, 955037, 956003, 957031, 958007, 959009, 960017,
    961003, 962009, 963019, 964009, 965023, 966011, 967003, 968003,
    969011, 970027, 971021, 972001, 973001, 974003, 975011, 976009,
    977021, 978001, 979001, 980027, 981011, 982021, 983063, 984007,
    985003, 986023, 987013, 988007, 989011, 990001, 991009, 992011,
    993001, 994013, 995009, 996001, 997001, 998009, 999007, 1000003,
];

/// Capacity hints below this always get the smallest prime.
const MIN_CAPACITY: usize = 500;
/// Capacity hints above this always get the largest prime.
const MAX_CAPACITY: usize = 500_000;

/// Map a capacity hint to a bucket count.
///
/// The hint is doubled, clamped to the table's range and rounded up to the next table entry.
fn bucket_count(capacity_hint: usize) -> usize {
    if capacity_hint < MIN_CAPACITY {
        return PRIME_SIZES[0];
    }
    if capacity_hint > MAX_CAPACITY {
        return PRIME_SIZES[PRIME_SIZES.len() - 1];
    }

    let doubled = 2 * capacity_hint;
    PRIME_SIZES[(doubled - 1) / 1000]
}

/// A 4-bit rotating hash over the concatenation of two strings.
///
/// After every byte the top nibble of the low 32 bits is folded back and cleared. Deterministic
/// and fast over short ASCII names; not cryptographic.
fn hash(first: &str, second: &str) -> u64 {
    let mut value: u64 = 0;
    for &byte in first.as_bytes().iter().chain(second.as_bytes()) {
        value = (value << 4).wrapping_add(u64::from(byte));
        let top_nibble = value & 0xF000_0000;
        if top_nibble != 0 {
            value ^= top_nibble >> 24;
            value &= !top_nibble;
        }
    }

    value
}

/// An interned name with its assigned id and the line it was declared on.
#[derive(Debug)]
struct Entry {
    first: String,
    second: String,
    id: usize,
    line: u64,
}

/// Maps names to dense ids, rejecting duplicates.
///
/// The second key string is empty except in the element table, where the key is the
/// (column, row) name pair.
#[derive(Debug)]
pub(crate) struct NameTable {
    buckets: Vec<Vec<Entry>>,
    len: usize,
}

impl NameTable {
    /// Create a table sized for roughly `capacity_hint` names.
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            buckets: (0..bucket_count(capacity_hint)).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Intern `name` under `id`.
    ///
    /// # Errors
    ///
    /// If the name is already present, the line number of the original declaration.
    pub fn insert(&mut self, id: usize, line: u64, name: &str) -> Result<(), u64> {
        self.insert_pair(id, line, name, "")
    }

    /// Intern a two-part key under `id`.
    ///
    /// # Errors
    ///
    /// If the key is already present, the line number of the original declaration.
    pub fn insert_pair(&mut self, id: usize, line: u64, first: &str, second: &str) -> Result<(), u64> {
        let bucket = self.bucket_of(first, second);
        if let Some(existing) = self.buckets[bucket].iter()
            .find(|entry| entry.first == first && entry.second == second) {
            return Err(existing.line);
        }

        self.buckets[bucket].push(Entry {
            first: first.to_string(),
            second: second.to_string(),
            id,
            line,
        });
        self.len += 1;

        Ok(())
    }

    /// Look up the id assigned to `name`. Never fails; absence is the caller's decision to judge.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.get_pair(name, "")
    }

    /// Look up the id assigned to a two-part key.
    pub fn get_pair(&self, first: &str, second: &str) -> Option<usize> {
        self.buckets[self.bucket_of(first, second)].iter()
            .find(|entry| entry.first == first && entry.second == second)
            .map(|entry| entry.id)
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.len
    }

    fn bucket_of(&self, first: &str, second: &str) -> usize {
        (hash(first, second) % self.buckets.len() as u64) as usize
    }
}
