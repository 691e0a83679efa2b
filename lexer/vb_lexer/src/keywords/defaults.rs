//! Built-in word lists.

use super::KeywordCategory;

pub(super) const DEFAULT_WORDS: [(KeywordCategory, &str); 6] = [
    (KeywordCategory::Keywords, KEYWORDS),
    (KeywordCategory::TypeKeywords, TYPE_KEYWORDS),
    (KeywordCategory::ContextKeywords, CONTEXT_KEYWORDS),
    (KeywordCategory::Preprocessor, PREPROCESSOR),
    (KeywordCategory::Attributes, ATTRIBUTES),
    (KeywordCategory::Constants, CONSTANTS),
];

const KEYWORDS: &str = "\
addhandler addressof alias and andalso as begin byref byval call case catch \
cbool cbyte cchar cdate cdbl cdec cint class clng cobj const continue csbyte \
cshort csng cstr ctype cuint culng cushort custom declare default delegate dim \
directcast do each else elseif end endif enum erase error event exit false \
finally for friend function get gettype getxmlnamespace global gosub goto \
handles if implements imports in inherits interface is isnot let lib like loop \
me mod module mustinherit mustoverride mybase myclass namespace narrowing new \
next not nothing notinheritable notoverridable of on operator option optional \
or orelse overloads overridable overrides paramarray partial private property \
protected public raiseevent readonly redim rem removehandler resume return \
select set shadows shared static step stop structure sub synclock then throw \
to true try trycast type typeof until using wend when while widening with \
withevents writeonly xor async await iterator yield \
";

const TYPE_KEYWORDS: &str = "\
boolean byte char currency date decimal double integer long longlong \
longptr object sbyte short single string uinteger ulong ushort variant \
";

const CONTEXT_KEYWORDS: &str = "\
ansi assembly auto binary compare database distinct equals explicit from \
group infer into join key off order preserve skip strict take text unicode \
where aggregate ascending descending \
";

const PREPROCESSOR: &str = "\
const else elseif end externalchecksum externalsource if region disable enable \
";

const ATTRIBUTES: &str = "\
attribute serializable obsolete dllimport structlayout comvisible \
";

const CONSTANTS: &str = "\
vbcr vbcrlf vblf vbnewline vbnullchar vbnullstring vbtab vbback vbformfeed \
vbverticaltab vbobjecterror vbtrue vbfalse vbusedefault vbempty vbnull \
";
